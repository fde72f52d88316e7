use crate::events;
use crate::storage;
use crate::types::{CampaignConfig, CampaignState, Phase, Schedule};
use soroban_sdk::Env;

/// Phase implied by the clock and the raised total alone.
pub fn derive_phase(
    now: u64,
    schedule: Option<&Schedule>,
    raised_total: i128,
    max_cap: i128,
) -> Phase {
    let schedule = match schedule {
        Some(schedule) => schedule,
        None => return Phase::Pending,
    };

    if now >= schedule.end || (max_cap > 0 && raised_total >= max_cap) {
        Phase::Ended
    } else if now >= schedule.public_start {
        Phase::PublicSale
    } else if now >= schedule.presale_unlimited_start {
        Phase::PreSaleOpenWhitelisted
    } else if now >= schedule.presale_start {
        Phase::PreSaleWhitelisted
    } else {
        Phase::Pending
    }
}

/// Combines the stored phase with the derived one; the result never moves backwards.
pub fn current_phase(
    now: u64,
    schedule: Option<&Schedule>,
    config: &CampaignConfig,
    state: &CampaignState,
) -> Phase {
    derive_phase(now, schedule, state.raised_total, config.max_cap).max(state.phase)
}

/// Advances `state.phase` in place, emitting a transition event. Returns the resulting phase.
pub fn advance(env: &Env, config: &CampaignConfig, state: &mut CampaignState) -> Phase {
    let schedule = storage::get_schedule(env);
    let next = current_phase(env.ledger().timestamp(), schedule.as_ref(), config, state);
    if next != state.phase {
        events::emit_phase_changed(env, state.phase, next, state.raised_total);
        state.phase = next;
    }
    next
}

pub fn is_valid_schedule(schedule: &Schedule) -> bool {
    schedule.presale_start < schedule.presale_unlimited_start
        && schedule.presale_unlimited_start < schedule.public_start
        && schedule.public_start < schedule.end
}
