#![no_std]

use ownable::OwnershipError;
use soroban_sdk::{
    contract, contracterror, contractimpl, contractmeta, contracttype, symbol_short, Address,
    Env, String, Symbol,
};

contractmeta!(
    key = "Description",
    val = "Crowdsale Token - issued token minted by the campaign controller"
);

const DAY_IN_LEDGERS: u32 = 17_280;
const BALANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const BALANCE_LIFETIME_THRESHOLD: u32 = BALANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum TokenError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotAuthorized = 3,
    TransfersLocked = 4,
    InvalidAmount = 5,
    InsufficientBalance = 6,
    InsufficientAllowance = 7,
    Overflow = 8,
    NoPendingOwner = 9,
}

impl From<OwnershipError> for TokenError {
    fn from(err: OwnershipError) -> Self {
        match err {
            OwnershipError::NoPendingOwner => TokenError::NoPendingOwner,
            OwnershipError::OwnerNotSet => TokenError::NotInitialized,
            OwnershipError::NotOwner | OwnershipError::NotPendingOwner => {
                TokenError::NotAuthorized
            }
        }
    }
}

#[derive(Clone)]
#[contracttype]
pub struct TokenMetadata {
    pub decimal: u32,
    pub name: String,
    pub symbol: String,
}

#[contracttype]
pub enum DataKey {
    Metadata,
    Minter,
    TotalSupply,
    LockedUntil,
    Balance(Address),
    Allowance(Address, Address),
}

#[derive(Clone)]
#[contracttype]
pub struct LockEvent {
    pub locked_until: u64,
    pub reason: Symbol,
}

#[contract]
pub struct CrowdsaleToken;

#[contractimpl]
impl CrowdsaleToken {
    pub fn initialize(
        env: Env,
        owner: Address,
        minter: Address,
        decimal: u32,
        name: String,
        symbol: String,
        locked_until: u64,
    ) -> Result<(), TokenError> {
        if env.storage().instance().has(&DataKey::Metadata) {
            return Err(TokenError::AlreadyInitialized);
        }
        owner.require_auth();

        let metadata = TokenMetadata {
            decimal,
            name,
            symbol,
        };
        env.storage().instance().set(&DataKey::Metadata, &metadata);
        env.storage().instance().set(&DataKey::Minter, &minter);
        env.storage().instance().set(&DataKey::TotalSupply, &0i128);
        env.storage()
            .instance()
            .set(&DataKey::LockedUntil, &locked_until);
        ownable::init(&env, &owner);

        env.events()
            .publish(("TOKEN", symbol_short!("INIT")), (owner, minter, locked_until));
        Ok(())
    }

    /// Mint hook reserved for the campaign controller.
    pub fn mint(env: Env, to: Address, amount: i128) -> Result<(), TokenError> {
        let minter = Self::read_minter(&env)?;
        minter.require_auth();
        if amount < 0 {
            return Err(TokenError::InvalidAmount);
        }

        let supply = Self::total_supply(env.clone())
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        let balance = Self::balance(env.clone(), to.clone())
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        env.storage().instance().set(&DataKey::TotalSupply, &supply);
        Self::write_balance(&env, &to, balance);

        env.events()
            .publish(("TOKEN", symbol_short!("MINT")), (minter, to, amount));
        Ok(())
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), TokenError> {
        from.require_auth();
        Self::require_unlocked(&env)?;
        Self::move_balance(&env, &from, &to, amount)?;

        env.events()
            .publish(("TOKEN", symbol_short!("TRANSFER")), (from, to, amount));
        Ok(())
    }

    pub fn approve(
        env: Env,
        from: Address,
        spender: Address,
        amount: i128,
    ) -> Result<(), TokenError> {
        from.require_auth();
        Self::require_unlocked(&env)?;
        if amount < 0 {
            return Err(TokenError::InvalidAmount);
        }

        let key = DataKey::Allowance(from.clone(), spender.clone());
        env.storage().persistent().set(&key, &amount);
        env.storage()
            .persistent()
            .extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);

        env.events()
            .publish(("TOKEN", symbol_short!("APPROVE")), (from, spender, amount));
        Ok(())
    }

    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), TokenError> {
        spender.require_auth();
        Self::require_unlocked(&env)?;

        let allowance = Self::allowance(env.clone(), from.clone(), spender.clone());
        if allowance < amount {
            return Err(TokenError::InsufficientAllowance);
        }
        Self::move_balance(&env, &from, &to, amount)?;

        let key = DataKey::Allowance(from.clone(), spender);
        env.storage().persistent().set(&key, &(allowance - amount));

        env.events()
            .publish(("TOKEN", symbol_short!("TRANSFER")), (from, to, amount));
        Ok(())
    }

    /// Blocks holder-initiated movements until `locked_until`. Passing a past timestamp unlocks.
    pub fn lock_until(
        env: Env,
        caller: Address,
        locked_until: u64,
        reason: Symbol,
    ) -> Result<(), TokenError> {
        ownable::require_owner(&env, &caller)?;
        env.storage()
            .instance()
            .set(&DataKey::LockedUntil, &locked_until);

        env.events().publish(
            ("TOKEN", symbol_short!("LOCK")),
            LockEvent {
                locked_until,
                reason,
            },
        );
        Ok(())
    }

    pub fn set_minter(env: Env, caller: Address, minter: Address) -> Result<(), TokenError> {
        ownable::require_owner(&env, &caller)?;
        env.storage().instance().set(&DataKey::Minter, &minter);

        env.events()
            .publish(("TOKEN", symbol_short!("MINTER")), minter);
        Ok(())
    }

    pub fn transfer_ownership(
        env: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), TokenError> {
        Ok(ownable::propose(&env, &caller, &new_owner)?)
    }

    pub fn accept_ownership(env: Env, caller: Address) -> Result<(), TokenError> {
        ownable::accept(&env, &caller)?;
        Ok(())
    }

    // View functions
    pub fn owner(env: Env) -> Result<Address, TokenError> {
        Ok(ownable::owner(&env)?)
    }

    pub fn pending_owner(env: Env) -> Option<Address> {
        ownable::pending_owner(&env)
    }

    pub fn minter(env: Env) -> Result<Address, TokenError> {
        Self::read_minter(&env)
    }

    pub fn total_supply(env: Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::TotalSupply)
            .unwrap_or(0)
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Balance(id))
            .unwrap_or(0)
    }

    pub fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Allowance(from, spender))
            .unwrap_or(0)
    }

    pub fn locked_until(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::LockedUntil)
            .unwrap_or(0)
    }

    pub fn is_locked(env: Env) -> bool {
        env.ledger().timestamp() < Self::locked_until(env.clone())
    }

    pub fn decimals(env: Env) -> Result<u32, TokenError> {
        Ok(Self::read_metadata(&env)?.decimal)
    }

    pub fn name(env: Env) -> Result<String, TokenError> {
        Ok(Self::read_metadata(&env)?.name)
    }

    pub fn symbol(env: Env) -> Result<String, TokenError> {
        Ok(Self::read_metadata(&env)?.symbol)
    }

    fn read_metadata(env: &Env) -> Result<TokenMetadata, TokenError> {
        env.storage()
            .instance()
            .get(&DataKey::Metadata)
            .ok_or(TokenError::NotInitialized)
    }

    fn read_minter(env: &Env) -> Result<Address, TokenError> {
        env.storage()
            .instance()
            .get(&DataKey::Minter)
            .ok_or(TokenError::NotInitialized)
    }

    fn require_unlocked(env: &Env) -> Result<(), TokenError> {
        if Self::is_locked(env.clone()) {
            return Err(TokenError::TransfersLocked);
        }
        Ok(())
    }

    fn write_balance(env: &Env, id: &Address, amount: i128) {
        let key = DataKey::Balance(id.clone());
        env.storage().persistent().set(&key, &amount);
        env.storage()
            .persistent()
            .extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
    }

    fn move_balance(env: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), TokenError> {
        if amount < 0 {
            return Err(TokenError::InvalidAmount);
        }
        let from_balance = Self::balance(env.clone(), from.clone());
        if from_balance < amount {
            return Err(TokenError::InsufficientBalance);
        }
        Self::write_balance(env, from, from_balance - amount);

        let to_balance = Self::balance(env.clone(), to.clone())
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        Self::write_balance(env, to, to_balance);
        Ok(())
    }
}
