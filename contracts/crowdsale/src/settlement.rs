use crate::errors::Error;
use crate::events;
use crate::storage;
use crate::types::{BatchRefundReport, CampaignState};
use soroban_sdk::{contractclient, token, Address, Env};

/// Mint hook the issued token exposes to its controller.
#[contractclient(name = "RewardTokenClient")]
pub trait RewardTokenInterface {
    fn mint(env: Env, to: Address, amount: i128);
    fn total_supply(env: Env) -> i128;
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PaymentOutcome {
    Paid,
    Failed,
}

/// Attempts a currency payment out of the contract. A failing recipient is reported, not raised.
pub fn try_pay(env: &Env, currency: &Address, to: &Address, amount: i128) -> PaymentOutcome {
    let client = token::Client::new(env, currency);
    match client.try_transfer(&env.current_contract_address(), to, &amount) {
        Ok(Ok(())) => PaymentOutcome::Paid,
        _ => PaymentOutcome::Failed,
    }
}

pub fn held_balance(env: &Env, currency: &Address) -> i128 {
    token::Client::new(env, currency).balance(&env.current_contract_address())
}

/// Sweeps everything the contract holds to `recipient`; returns the amount moved.
pub fn sweep(env: &Env, currency: &Address, recipient: &Address) -> i128 {
    let balance = held_balance(env, currency);
    if balance > 0 {
        token::Client::new(env, currency).transfer(
            &env.current_contract_address(),
            recipient,
            &balance,
        );
    }
    balance
}

/// Core-team share. The partner allocation is always kept out of it: reserved while unclaimed,
/// already part of `current_supply` once claimed.
pub fn core_team_reward(
    max_token_supply: i128,
    current_supply: i128,
    partner_reward: i128,
    partner_claimed: bool,
) -> Result<i128, Error> {
    let outstanding_partner = if partner_claimed { 0 } else { partner_reward };
    let reward = max_token_supply
        .checked_sub(current_supply)
        .and_then(|r| r.checked_sub(outstanding_partner))
        .ok_or(Error::Overflow)?;
    if reward < 0 {
        return Err(Error::InvalidAmount);
    }
    Ok(reward)
}

pub fn mint_reward(env: &Env, token: &Address, to: &Address, amount: i128) {
    if amount > 0 {
        RewardTokenClient::new(env, token).mint(to, &amount);
    }
}

/// Walks up to `max_count` contributors from the stored cursor, paying back every entry that is
/// neither refunded nor previously unpayable.
pub fn run_batch_refund(
    env: &Env,
    currency: &Address,
    state: &mut CampaignState,
    max_count: u32,
) -> Result<BatchRefundReport, Error> {
    let total = storage::get_contributor_count(env);
    let mut report = BatchRefundReport {
        processed: 0,
        refunded: 0,
        failed: 0,
        cursor: state.refund_cursor,
    };

    while report.processed < max_count && state.refund_cursor < total {
        let index = state.refund_cursor;
        state.refund_cursor = index.checked_add(1).ok_or(Error::Overflow)?;
        report.processed += 1;

        let contributor = match storage::get_contributor_at(env, index) {
            Some(contributor) => contributor,
            None => continue,
        };
        let mut record = match storage::get_contribution(env, &contributor) {
            Some(record) => record,
            None => continue,
        };
        if record.refunded || record.refund_failed || record.amount <= 0 {
            continue;
        }

        match try_pay(env, currency, &contributor, record.amount) {
            PaymentOutcome::Paid => {
                record.refunded = true;
                state.batch_refund_count = state
                    .batch_refund_count
                    .checked_add(1)
                    .ok_or(Error::Overflow)?;
                report.refunded += 1;
                events::emit_refunded(env, contributor.clone(), record.amount, true);
            }
            PaymentOutcome::Failed => {
                record.refund_failed = true;
                report.failed += 1;
                events::emit_refund_failed(env, contributor.clone(), record.amount);
            }
        }
        storage::set_contribution(env, &contributor, &record);
    }

    if state.refund_cursor >= total {
        state.refund_pass_complete = true;
    }
    report.cursor = state.refund_cursor;

    events::emit_batch_progress(
        env,
        report.processed,
        report.refunded,
        report.failed,
        report.cursor,
        state.refund_pass_complete,
    );
    Ok(report)
}
