#![no_std]

use soroban_sdk::{contracterror, contracttype, symbol_short, Address, Env};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum OwnershipError {
    NotOwner = 100,
    NotPendingOwner = 101,
    NoPendingOwner = 102,
    OwnerNotSet = 103,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct OwnershipEvent {
    pub previous: Address,
    pub next: Address,
    pub timestamp: u64,
}

pub mod storage {
    use super::*;

    #[contracttype]
    pub enum OwnerKey {
        Owner,
        PendingOwner,
    }

    pub fn get_owner(env: &Env) -> Option<Address> {
        env.storage().instance().get(&OwnerKey::Owner)
    }

    pub fn set_owner(env: &Env, owner: &Address) {
        env.storage().instance().set(&OwnerKey::Owner, owner);
    }

    pub fn get_pending_owner(env: &Env) -> Option<Address> {
        env.storage().instance().get(&OwnerKey::PendingOwner)
    }

    pub fn set_pending_owner(env: &Env, pending: &Address) {
        env.storage()
            .instance()
            .set(&OwnerKey::PendingOwner, pending);
    }

    pub fn clear_pending_owner(env: &Env) {
        env.storage().instance().remove(&OwnerKey::PendingOwner);
    }
}

/// Records the first owner. Callers are expected to guard against re-initialization.
pub fn init(env: &Env, owner: &Address) {
    storage::set_owner(env, owner);
}

pub fn owner(env: &Env) -> Result<Address, OwnershipError> {
    storage::get_owner(env).ok_or(OwnershipError::OwnerNotSet)
}

pub fn pending_owner(env: &Env) -> Option<Address> {
    storage::get_pending_owner(env)
}

/// Requires `caller` to have signed the invocation and to be the current owner.
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), OwnershipError> {
    caller.require_auth();
    if owner(env)? != *caller {
        return Err(OwnershipError::NotOwner);
    }
    Ok(())
}

/// First step of a transfer: nominate `new_owner`. A later proposal replaces an earlier one.
pub fn propose(env: &Env, caller: &Address, new_owner: &Address) -> Result<(), OwnershipError> {
    require_owner(env, caller)?;
    storage::set_pending_owner(env, new_owner);

    env.events().publish(
        ("OWNER", symbol_short!("PROPOSE")),
        OwnershipEvent {
            previous: caller.clone(),
            next: new_owner.clone(),
            timestamp: env.ledger().timestamp(),
        },
    );
    Ok(())
}

/// Second step: the nominee takes over. Returns the previous owner.
pub fn accept(env: &Env, caller: &Address) -> Result<Address, OwnershipError> {
    caller.require_auth();
    let pending = storage::get_pending_owner(env).ok_or(OwnershipError::NoPendingOwner)?;
    if pending != *caller {
        return Err(OwnershipError::NotPendingOwner);
    }

    let previous = owner(env)?;
    storage::set_owner(env, caller);
    storage::clear_pending_owner(env);

    env.events().publish(
        ("OWNER", symbol_short!("ACCEPT")),
        OwnershipEvent {
            previous: previous.clone(),
            next: caller.clone(),
            timestamp: env.ledger().timestamp(),
        },
    );
    Ok(previous)
}
