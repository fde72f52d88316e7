use crate::types::Phase;
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

// ==================== Event Payload Structs ====================
// Indexers subscribe via topic pattern ("CROWD", symbol_short!("…")).

#[derive(Clone)]
#[contracttype]
pub struct ConfigUpdatedEvent {
    pub field: Symbol,
    pub admin: Address,
    pub timestamp: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct WhitelistEditedEvent {
    pub contributor: Address,
    pub tier_a: i128,
    pub tier_b: i128,
    pub first_seen: bool,
}

#[derive(Clone)]
#[contracttype]
pub struct PhaseChangedEvent {
    pub from: Phase,
    pub to: Phase,
    pub raised_total: i128,
    pub timestamp: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct ContributionEvent {
    pub contributor: Address,
    pub accepted: i128,
    pub returned: i128,
    pub tokens_minted: i128,
    pub raised_total: i128,
    pub phase: Phase,
}

#[derive(Clone)]
#[contracttype]
pub struct PaymentEvent {
    pub recipient: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct RefundEvent {
    pub contributor: Address,
    pub amount: i128,
    /// true when paid by `batch_refund`, false for `claim_refund`.
    pub batch: bool,
}

#[derive(Clone)]
#[contracttype]
pub struct BatchProgressEvent {
    pub processed: u32,
    pub refunded: u32,
    pub failed: u32,
    pub cursor: u32,
    pub pass_complete: bool,
}

// ==================== Event Publishing Functions ====================

pub fn emit_initialized(env: &Env, owner: Address, currency: Address) {
    env.events()
        .publish(("CROWD", symbol_short!("INIT")), (owner, currency));
}

pub fn emit_config_updated(env: &Env, admin: Address, field: Symbol) {
    env.events().publish(
        ("CROWD", symbol_short!("CONFIG")),
        ConfigUpdatedEvent {
            field,
            admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_whitelist_edited(
    env: &Env,
    contributor: Address,
    tier_a: i128,
    tier_b: i128,
    first_seen: bool,
) {
    env.events().publish(
        ("CROWD", symbol_short!("WL_EDIT")),
        WhitelistEditedEvent {
            contributor,
            tier_a,
            tier_b,
            first_seen,
        },
    );
}

pub fn emit_phase_changed(env: &Env, from: Phase, to: Phase, raised_total: i128) {
    env.events().publish(
        ("CROWD", symbol_short!("PHASE")),
        PhaseChangedEvent {
            from,
            to,
            raised_total,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_contribution(
    env: &Env,
    contributor: Address,
    accepted: i128,
    returned: i128,
    tokens_minted: i128,
    raised_total: i128,
    phase: Phase,
) {
    env.events().publish(
        ("CROWD", symbol_short!("CONTRIB")),
        ContributionEvent {
            contributor,
            accepted,
            returned,
            tokens_minted,
            raised_total,
            phase,
        },
    );
}

pub fn emit_min_reached(env: &Env, raised_total: i128) {
    env.events()
        .publish(("CROWD", symbol_short!("MIN_HIT")), raised_total);
}

pub fn emit_funds_withdrawn(env: &Env, recipient: Address, amount: i128) {
    env.events().publish(
        ("CROWD", symbol_short!("WITHDRAW")),
        PaymentEvent {
            recipient,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_refunded(env: &Env, contributor: Address, amount: i128, batch: bool) {
    env.events().publish(
        ("CROWD", symbol_short!("REFUND")),
        RefundEvent {
            contributor,
            amount,
            batch,
        },
    );
}

pub fn emit_refund_failed(env: &Env, contributor: Address, amount: i128) {
    env.events().publish(
        ("CROWD", symbol_short!("REF_FAIL")),
        PaymentEvent {
            recipient: contributor,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_batch_progress(
    env: &Env,
    processed: u32,
    refunded: u32,
    failed: u32,
    cursor: u32,
    pass_complete: bool,
) {
    env.events().publish(
        ("CROWD", symbol_short!("BATCH")),
        BatchProgressEvent {
            processed,
            refunded,
            failed,
            cursor,
            pass_complete,
        },
    );
}

pub fn emit_recovered(env: &Env, recipient: Address, amount: i128) {
    env.events().publish(
        ("CROWD", symbol_short!("RECOVER")),
        PaymentEvent {
            recipient,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_reward_minted(env: &Env, topic: Symbol, beneficiary: Address, amount: i128) {
    env.events().publish(
        ("CROWD", topic),
        PaymentEvent {
            recipient: beneficiary,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}
