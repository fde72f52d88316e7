use crate::errors::Error;
use crate::types::*;
use soroban_sdk::{Address, Env};

const DAY_IN_LEDGERS: u32 = 17_280;
const INSTANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;
const LEDGER_BUMP_AMOUNT: u32 = 120 * DAY_IN_LEDGERS;
const LEDGER_LIFETIME_THRESHOLD: u32 = LEDGER_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn get_config(env: &Env) -> Result<CampaignConfig, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn set_config(env: &Env, config: &CampaignConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_schedule(env: &Env) -> Option<Schedule> {
    env.storage().instance().get(&DataKey::Schedule)
}

pub fn set_schedule(env: &Env, schedule: &Schedule) {
    env.storage().instance().set(&DataKey::Schedule, schedule);
}

pub fn get_state(env: &Env) -> Result<CampaignState, Error> {
    env.storage()
        .instance()
        .get(&DataKey::State)
        .ok_or(Error::NotInitialized)
}

pub fn set_state(env: &Env, state: &CampaignState) {
    env.storage().instance().set(&DataKey::State, state);
}

// ---------------------------------------------------------------------
// Whitelist table
// ---------------------------------------------------------------------

pub fn get_allowance(env: &Env, contributor: &Address) -> Option<WhitelistEntry> {
    env.storage()
        .persistent()
        .get(&DataKey::Allowance(contributor.clone()))
}

pub fn set_allowance(env: &Env, contributor: &Address, entry: &WhitelistEntry) {
    let key = DataKey::Allowance(contributor.clone());
    env.storage().persistent().set(&key, entry);
    env.storage()
        .persistent()
        .extend_ttl(&key, LEDGER_LIFETIME_THRESHOLD, LEDGER_BUMP_AMOUNT);
}

pub fn get_whitelist_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::WhitelistCount)
        .unwrap_or(0)
}

pub fn set_whitelist_count(env: &Env, count: u32) {
    env.storage()
        .instance()
        .set(&DataKey::WhitelistCount, &count);
}

// ---------------------------------------------------------------------
// Contribution ledger
// ---------------------------------------------------------------------

pub fn get_contribution(env: &Env, contributor: &Address) -> Option<Contribution> {
    env.storage()
        .persistent()
        .get(&DataKey::Contribution(contributor.clone()))
}

pub fn set_contribution(env: &Env, contributor: &Address, contribution: &Contribution) {
    let key = DataKey::Contribution(contributor.clone());
    env.storage().persistent().set(&key, contribution);
    env.storage()
        .persistent()
        .extend_ttl(&key, LEDGER_LIFETIME_THRESHOLD, LEDGER_BUMP_AMOUNT);
}

pub fn get_contributor_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::ContributorCount)
        .unwrap_or(0)
}

pub fn set_contributor_count(env: &Env, count: u32) {
    env.storage()
        .instance()
        .set(&DataKey::ContributorCount, &count);
}

pub fn get_contributor_at(env: &Env, index: u32) -> Option<Address> {
    env.storage().persistent().get(&DataKey::Contributor(index))
}

pub fn set_contributor_at(env: &Env, index: u32, contributor: &Address) {
    let key = DataKey::Contributor(index);
    env.storage().persistent().set(&key, contributor);
    env.storage()
        .persistent()
        .extend_ttl(&key, LEDGER_LIFETIME_THRESHOLD, LEDGER_BUMP_AMOUNT);
}
