use crate::caps;
use crate::errors::Error;
use crate::events;
use crate::ledger;
use crate::phase;
use crate::settlement::{self, PaymentOutcome, RewardTokenClient};
use crate::storage;
use crate::types::*;
use soroban_sdk::{
    contract, contractimpl, contractmeta, symbol_short, token, Address, Env, Symbol, Vec,
};

// Metadata that is added on to every WASM custom section
contractmeta!(
    key = "Description",
    val = "Phased crowdsale controller with whitelist tiers, caps and refunds"
);

#[contract]
pub struct CrowdsaleContract;

fn load(env: &Env) -> Result<(CampaignConfig, CampaignState), Error> {
    Ok((storage::get_config(env)?, storage::get_state(env)?))
}

fn persist(env: &Env, state: &CampaignState) {
    storage::set_state(env, state);
    storage::extend_instance(env);
}

fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
    ownable::require_owner(env, caller)?;
    Ok(())
}

/// Loads the campaign for an admin edit of a locked field. Fails once the sale has left Pending.
fn open_config(env: &Env, caller: &Address) -> Result<(CampaignConfig, CampaignState), Error> {
    require_admin(env, caller)?;
    let (config, mut state) = load(env)?;
    if phase::advance(env, &config, &mut state) != Phase::Pending {
        return Err(Error::ConfigLocked);
    }
    Ok((config, state))
}

fn commit_config(
    env: &Env,
    caller: Address,
    field: Symbol,
    config: &CampaignConfig,
    state: &CampaignState,
) {
    storage::set_config(env, config);
    persist(env, state);
    events::emit_config_updated(env, caller, field);
}

/// Shared gate for the failure-path settlement calls.
fn require_failed_campaign(phase: Phase, state: &CampaignState) -> Result<(), Error> {
    if phase != Phase::Ended {
        return Err(Error::NotEnded);
    }
    if state.min_reached {
        return Err(Error::MinCapReached);
    }
    Ok(())
}

/// Shared gate for the reward mints.
fn require_successful_campaign(phase: Phase, state: &CampaignState) -> Result<(), Error> {
    if phase != Phase::Ended {
        return Err(Error::NotEnded);
    }
    if !state.min_reached {
        return Err(Error::MinCapNotReached);
    }
    Ok(())
}

#[contractimpl]
impl CrowdsaleContract {
    // ---------------------------------------------------------------------
    // Setup
    // ---------------------------------------------------------------------

    /// Creates an unconfigured campaign raising `currency`, administered by `owner`.
    pub fn initialize(env: Env, owner: Address, currency: Address) -> Result<(), Error> {
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }
        owner.require_auth();

        ownable::init(&env, &owner);
        let config = CampaignConfig {
            currency: currency.clone(),
            token: None,
            funds_recipient: None,
            partner: None,
            min_cap: 0,
            max_cap: 0,
            max_token_supply: 0,
            partner_reward: 0,
            token_rate: 0,
        };
        storage::set_config(&env, &config);
        persist(&env, &CampaignState::default());

        events::emit_initialized(&env, owner, currency);
        Ok(())
    }

    pub fn set_token(env: Env, caller: Address, token: Address) -> Result<(), Error> {
        let (mut config, state) = open_config(&env, &caller)?;
        config.token = Some(token);
        commit_config(&env, caller, symbol_short!("token"), &config, &state);
        Ok(())
    }

    pub fn set_caps(env: Env, caller: Address, min_cap: i128, max_cap: i128) -> Result<(), Error> {
        let (mut config, state) = open_config(&env, &caller)?;
        if min_cap <= 0 || min_cap > max_cap {
            return Err(Error::InvalidCaps);
        }
        config.min_cap = min_cap;
        config.max_cap = max_cap;
        commit_config(&env, caller, symbol_short!("caps"), &config, &state);
        Ok(())
    }

    /// Sets the four phase boundaries. They must be strictly increasing.
    pub fn set_schedule(
        env: Env,
        caller: Address,
        presale_start: u64,
        presale_unlimited_start: u64,
        public_start: u64,
        end: u64,
    ) -> Result<(), Error> {
        let (config, mut state) = open_config(&env, &caller)?;
        let schedule = Schedule {
            presale_start,
            presale_unlimited_start,
            public_start,
            end,
        };
        if !phase::is_valid_schedule(&schedule) {
            return Err(Error::InvalidSchedule);
        }
        storage::set_schedule(&env, &schedule);
        // A schedule already in the past moves the campaign immediately.
        phase::advance(&env, &config, &mut state);
        commit_config(&env, caller, symbol_short!("schedule"), &config, &state);
        Ok(())
    }

    pub fn set_max_token_supply(env: Env, caller: Address, supply: i128) -> Result<(), Error> {
        let (mut config, state) = open_config(&env, &caller)?;
        if supply < 0 {
            return Err(Error::InvalidAmount);
        }
        config.max_token_supply = supply;
        commit_config(&env, caller, symbol_short!("supply"), &config, &state);
        Ok(())
    }

    pub fn set_partner_reward(env: Env, caller: Address, reward: i128) -> Result<(), Error> {
        let (mut config, state) = open_config(&env, &caller)?;
        if reward < 0 {
            return Err(Error::InvalidAmount);
        }
        config.partner_reward = reward;
        commit_config(&env, caller, symbol_short!("reward"), &config, &state);
        Ok(())
    }

    pub fn set_token_rate(env: Env, caller: Address, rate: i128) -> Result<(), Error> {
        let (mut config, state) = open_config(&env, &caller)?;
        if rate < 0 {
            return Err(Error::InvalidAmount);
        }
        config.token_rate = rate;
        commit_config(&env, caller, symbol_short!("rate"), &config, &state);
        Ok(())
    }

    /// The funds recipient stays editable for the whole campaign.
    pub fn set_funds_recipient(env: Env, caller: Address, recipient: Address) -> Result<(), Error> {
        require_admin(&env, &caller)?;
        let (mut config, mut state) = load(&env)?;
        phase::advance(&env, &config, &mut state);
        config.funds_recipient = Some(recipient);
        commit_config(&env, caller, symbol_short!("recipient"), &config, &state);
        Ok(())
    }

    pub fn set_partner(env: Env, caller: Address, partner: Address) -> Result<(), Error> {
        require_admin(&env, &caller)?;
        let (mut config, mut state) = load(&env)?;
        phase::advance(&env, &config, &mut state);
        config.partner = Some(partner);
        commit_config(&env, caller, symbol_short!("partner"), &config, &state);
        Ok(())
    }

    /// Upserts whitelist allowances. Rejected once the public sale has opened.
    pub fn edit_contributors(
        env: Env,
        caller: Address,
        addresses: Vec<Address>,
        tier_a: Vec<i128>,
        tier_b: Vec<i128>,
    ) -> Result<u32, Error> {
        require_admin(&env, &caller)?;
        let (config, mut state) = load(&env)?;
        if phase::advance(&env, &config, &mut state) >= Phase::PublicSale {
            return Err(Error::ConfigLocked);
        }
        let count = ledger::edit_whitelist(&env, &addresses, &tier_a, &tier_b)?;
        persist(&env, &state);
        Ok(count)
    }

    pub fn transfer_ownership(env: Env, caller: Address, new_owner: Address) -> Result<(), Error> {
        ownable::propose(&env, &caller, &new_owner)?;
        storage::extend_instance(&env);
        Ok(())
    }

    pub fn accept_ownership(env: Env, caller: Address) -> Result<(), Error> {
        ownable::accept(&env, &caller)?;
        storage::extend_instance(&env);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Sale
    // ---------------------------------------------------------------------

    /// Persists the phase implied by the current ledger time.
    pub fn sync_phase(env: Env) -> Result<Phase, Error> {
        let (config, mut state) = load(&env)?;
        let current = phase::advance(&env, &config, &mut state);
        persist(&env, &state);
        Ok(current)
    }

    /// Accepts up to the contributor's current maximum. Only the accepted part is pulled from
    /// the contributor; the remainder is reported back in the receipt.
    pub fn contribute(
        env: Env,
        contributor: Address,
        amount: i128,
    ) -> Result<ContributionReceipt, Error> {
        contributor.require_auth();
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let (config, mut state) = load(&env)?;
        let current = phase::advance(&env, &config, &mut state);
        if current == Phase::Pending || current == Phase::Ended {
            return Err(Error::SaleNotActive);
        }

        let room = caps::remaining_global_room(config.max_cap, state.raised_total);
        let allowance = storage::get_allowance(&env, &contributor);
        let contributed = ledger::contributed(&env, &contributor);
        let max = caps::max_contribution(current, room, allowance.as_ref(), contributed);
        let (accepted, returned) = caps::admit(amount, max).ok_or(Error::CapExceeded)?;

        token::Client::new(&env, &config.currency).transfer(
            &contributor,
            &env.current_contract_address(),
            &accepted,
        );
        ledger::post(&env, &contributor, accepted)?;
        state.raised_total = state
            .raised_total
            .checked_add(accepted)
            .ok_or(Error::Overflow)?;

        let mut tokens_minted = 0;
        if let Some(token) = config.token.as_ref() {
            if config.token_rate > 0 {
                tokens_minted = accepted
                    .checked_mul(config.token_rate)
                    .ok_or(Error::Overflow)?;
                settlement::mint_reward(&env, token, &contributor, tokens_minted);
            }
        }

        events::emit_contribution(
            &env,
            contributor,
            accepted,
            returned,
            tokens_minted,
            state.raised_total,
            current,
        );

        if !state.min_reached && state.raised_total >= config.min_cap {
            state.min_reached = true;
            events::emit_min_reached(&env, state.raised_total);
        }
        phase::advance(&env, &config, &mut state);
        persist(&env, &state);

        Ok(ContributionReceipt {
            accepted,
            returned,
            phase: current,
        })
    }

    // ---------------------------------------------------------------------
    // Settlement: success path
    // ---------------------------------------------------------------------

    /// Sends the whole held balance to the funds recipient. Available as soon as the minimum
    /// cap is reached; a call with nothing held succeeds and moves nothing.
    pub fn withdraw_funds(env: Env, caller: Address) -> Result<i128, Error> {
        require_admin(&env, &caller)?;
        let (config, mut state) = load(&env)?;
        phase::advance(&env, &config, &mut state);
        if !state.min_reached {
            return Err(Error::MinCapNotReached);
        }
        let recipient = config.funds_recipient.ok_or(Error::RecipientNotSet)?;

        let amount = settlement::sweep(&env, &config.currency, &recipient);
        if amount > 0 {
            events::emit_funds_withdrawn(&env, recipient, amount);
        }
        persist(&env, &state);
        Ok(amount)
    }

    pub fn claim_core_team_reward(
        env: Env,
        caller: Address,
        beneficiary: Address,
    ) -> Result<i128, Error> {
        require_admin(&env, &caller)?;
        let (config, mut state) = load(&env)?;
        let current = phase::advance(&env, &config, &mut state);
        require_successful_campaign(current, &state)?;
        if state.core_team_claimed {
            return Err(Error::AlreadyClaimed);
        }
        let token = config.token.ok_or(Error::TokenNotSet)?;

        let supply = RewardTokenClient::new(&env, &token).total_supply();
        let reward = settlement::core_team_reward(
            config.max_token_supply,
            supply,
            config.partner_reward,
            state.partner_claimed,
        )?;
        settlement::mint_reward(&env, &token, &beneficiary, reward);
        state.core_team_claimed = true;

        events::emit_reward_minted(&env, symbol_short!("CORE"), beneficiary, reward);
        persist(&env, &state);
        Ok(reward)
    }

    pub fn claim_partner_reward(env: Env, caller: Address) -> Result<i128, Error> {
        let (config, mut state) = load(&env)?;
        let partner = config.partner.clone().ok_or(Error::PartnerNotSet)?;
        caller.require_auth();
        if caller != partner {
            return Err(Error::NotAuthorized);
        }
        let current = phase::advance(&env, &config, &mut state);
        require_successful_campaign(current, &state)?;
        if state.partner_claimed {
            return Err(Error::AlreadyClaimed);
        }
        let token = config.token.ok_or(Error::TokenNotSet)?;

        settlement::mint_reward(&env, &token, &partner, config.partner_reward);
        state.partner_claimed = true;

        events::emit_reward_minted(&env, symbol_short!("PARTNER"), partner, config.partner_reward);
        persist(&env, &state);
        Ok(config.partner_reward)
    }

    // ---------------------------------------------------------------------
    // Settlement: failure path
    // ---------------------------------------------------------------------

    /// Pays a contributor back in full after a campaign that missed its minimum.
    pub fn claim_refund(env: Env, contributor: Address) -> Result<i128, Error> {
        contributor.require_auth();
        let (config, mut state) = load(&env)?;
        let current = phase::advance(&env, &config, &mut state);
        require_failed_campaign(current, &state)?;
        if state.recovered {
            return Err(Error::RecoveryCompleted);
        }

        let mut record =
            storage::get_contribution(&env, &contributor).ok_or(Error::NoContribution)?;
        if record.amount <= 0 {
            return Err(Error::NoContribution);
        }
        if record.refunded {
            return Err(Error::AlreadyRefunded);
        }

        if settlement::try_pay(&env, &config.currency, &contributor, record.amount)
            == PaymentOutcome::Failed
        {
            return Err(Error::TransferFailed);
        }
        record.refunded = true;
        record.refund_failed = false;
        storage::set_contribution(&env, &contributor, &record);

        events::emit_refunded(&env, contributor, record.amount, false);
        persist(&env, &state);
        Ok(record.amount)
    }

    /// Refunds up to `max_count` contributors from the stored cursor. Payments that fail are
    /// flagged and skipped without aborting the batch.
    pub fn batch_refund(
        env: Env,
        caller: Address,
        max_count: u32,
    ) -> Result<BatchRefundReport, Error> {
        require_admin(&env, &caller)?;
        if max_count == 0 {
            return Err(Error::InvalidAmount);
        }
        let (config, mut state) = load(&env)?;
        let current = phase::advance(&env, &config, &mut state);
        require_failed_campaign(current, &state)?;
        if state.recovered {
            return Err(Error::RecoveryCompleted);
        }

        let report = settlement::run_batch_refund(&env, &config.currency, &mut state, max_count)?;
        persist(&env, &state);
        Ok(report)
    }

    /// Sweeps what a full refund pass could not pay out to the funds recipient.
    pub fn withdraw_remaining_for_recovery(
        env: Env,
        caller: Address,
    ) -> Result<i128, Error> {
        require_admin(&env, &caller)?;
        let (config, mut state) = load(&env)?;
        let current = phase::advance(&env, &config, &mut state);
        require_failed_campaign(current, &state)?;
        if !state.refund_pass_complete {
            return Err(Error::PrematureRecovery);
        }
        let recipient = config.funds_recipient.ok_or(Error::RecipientNotSet)?;

        let amount = settlement::sweep(&env, &config.currency, &recipient);
        state.recovered = true;
        events::emit_recovered(&env, recipient, amount);
        persist(&env, &state);
        Ok(amount)
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// Phase at the current ledger time. Does not write.
    pub fn get_phase(env: Env) -> Result<Phase, Error> {
        let (config, state) = load(&env)?;
        let schedule = storage::get_schedule(&env);
        Ok(phase::current_phase(
            get_ledger_timestamp(&env),
            schedule.as_ref(),
            &config,
            &state,
        ))
    }

    pub fn get_schedule(env: Env) -> Option<Schedule> {
        storage::get_schedule(&env)
    }

    pub fn get_raised_total(env: Env) -> Result<i128, Error> {
        Ok(storage::get_state(&env)?.raised_total)
    }

    pub fn is_min_reached(env: Env) -> Result<bool, Error> {
        Ok(storage::get_state(&env)?.min_reached)
    }

    pub fn get_contribution_amount(env: Env, contributor: Address) -> i128 {
        ledger::contributed(&env, &contributor)
    }

    pub fn get_contribution(env: Env, contributor: Address) -> Option<Contribution> {
        storage::get_contribution(&env, &contributor)
    }

    /// Largest amount `contributor` could post right now.
    pub fn max_contribution(env: Env, contributor: Address) -> Result<i128, Error> {
        let (config, state) = load(&env)?;
        let schedule = storage::get_schedule(&env);
        let current = phase::current_phase(
            get_ledger_timestamp(&env),
            schedule.as_ref(),
            &config,
            &state,
        );
        let room = caps::remaining_global_room(config.max_cap, state.raised_total);
        let allowance = storage::get_allowance(&env, &contributor);
        Ok(caps::max_contribution(
            current,
            room,
            allowance.as_ref(),
            ledger::contributed(&env, &contributor),
        ))
    }

    pub fn contributor_count(env: Env) -> u32 {
        storage::get_contributor_count(&env)
    }

    pub fn contributor_at(env: Env, index: u32) -> Option<Address> {
        storage::get_contributor_at(&env, index)
    }

    pub fn get_allowance(env: Env, contributor: Address) -> Option<WhitelistEntry> {
        storage::get_allowance(&env, &contributor)
    }

    pub fn whitelist_count(env: Env) -> u32 {
        storage::get_whitelist_count(&env)
    }

    pub fn get_config(env: Env) -> Result<CampaignConfig, Error> {
        storage::get_config(&env)
    }

    pub fn get_state(env: Env) -> Result<CampaignState, Error> {
        storage::get_state(&env)
    }

    /// Refunds paid out by the batch path.
    pub fn refund_count(env: Env) -> Result<u32, Error> {
        Ok(storage::get_state(&env)?.batch_refund_count)
    }

    pub fn refund_cursor(env: Env) -> Result<u32, Error> {
        Ok(storage::get_state(&env)?.refund_cursor)
    }

    pub fn owner(env: Env) -> Result<Address, Error> {
        Ok(ownable::owner(&env)?)
    }

    pub fn pending_owner(env: Env) -> Option<Address> {
        ownable::pending_owner(&env)
    }
}
