//! Contribution room arithmetic. Everything here is a pure function of its inputs so the
//! admissible amount agrees no matter which entry point asks for it.

use crate::types::{Phase, WhitelistEntry};

/// Room left under the hard cap, never negative.
pub fn remaining_global_room(max_cap: i128, raised_total: i128) -> i128 {
    max_cap.saturating_sub(raised_total).max(0)
}

/// Largest amount `contributor` may still post in `phase`.
///
/// `allowance` is the contributor's whitelist entry (if any) and `contributed` its cumulative
/// ledger amount.
pub fn max_contribution(
    phase: Phase,
    room: i128,
    allowance: Option<&WhitelistEntry>,
    contributed: i128,
) -> i128 {
    let room = room.max(0);
    match phase {
        Phase::Pending | Phase::Ended => 0,
        Phase::PreSaleWhitelisted => match allowance {
            Some(entry) => {
                let personal = entry.total().saturating_sub(contributed).max(0);
                personal.min(room)
            }
            None => 0,
        },
        Phase::PreSaleOpenWhitelisted => match allowance {
            Some(entry) if entry.is_member() => room,
            _ => 0,
        },
        Phase::PublicSale => room,
    }
}

/// Splits a request into (accepted, returned). `None` when nothing can be accepted.
pub fn admit(requested: i128, max: i128) -> Option<(i128, i128)> {
    if requested <= 0 || max <= 0 {
        return None;
    }
    let accepted = requested.min(max);
    Some((accepted, requested - accepted))
}
