use crate::errors::Error;
use crate::events;
use crate::storage;
use crate::types::{Contribution, WhitelistEntry};
use soroban_sdk::{Address, Env, Vec};

/// Upserts whitelist allowances. All three vectors must be the same length.
pub fn edit_whitelist(
    env: &Env,
    addresses: &Vec<Address>,
    tier_a: &Vec<i128>,
    tier_b: &Vec<i128>,
) -> Result<u32, Error> {
    if addresses.len() != tier_a.len() || addresses.len() != tier_b.len() {
        return Err(Error::LengthMismatch);
    }

    let mut count = storage::get_whitelist_count(env);
    for i in 0..addresses.len() {
        let (address, a, b) = match (addresses.get(i), tier_a.get(i), tier_b.get(i)) {
            (Some(address), Some(a), Some(b)) => (address, a, b),
            _ => return Err(Error::LengthMismatch),
        };
        if a < 0 || b < 0 {
            return Err(Error::InvalidAmount);
        }

        let first_seen = storage::get_allowance(env, &address).is_none();
        if first_seen {
            count = count.checked_add(1).ok_or(Error::Overflow)?;
        }
        storage::set_allowance(
            env,
            &address,
            &WhitelistEntry {
                tier_a: a,
                tier_b: b,
            },
        );
        events::emit_whitelist_edited(env, address, a, b, first_seen);
    }
    storage::set_whitelist_count(env, count);
    Ok(count)
}

pub fn contributed(env: &Env, contributor: &Address) -> i128 {
    storage::get_contribution(env, contributor)
        .map(|c| c.amount)
        .unwrap_or(0)
}

/// Credits `amount` to `contributor`, appending it to the contributor list on first sight.
pub fn post(env: &Env, contributor: &Address, amount: i128) -> Result<Contribution, Error> {
    let record = match storage::get_contribution(env, contributor) {
        Some(mut existing) => {
            existing.amount = existing
                .amount
                .checked_add(amount)
                .ok_or(Error::Overflow)?;
            existing
        }
        None => {
            let index = storage::get_contributor_count(env);
            storage::set_contributor_at(env, index, contributor);
            storage::set_contributor_count(env, index.checked_add(1).ok_or(Error::Overflow)?);
            Contribution {
                amount,
                refunded: false,
                refund_failed: false,
            }
        }
    };
    storage::set_contribution(env, contributor, &record);
    Ok(record)
}
