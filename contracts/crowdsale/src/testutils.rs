//! Test-only raised currency whose transfers to blocked recipients fail, standing in for a
//! frozen or otherwise unpayable account.

use soroban_sdk::{contract, contracterror, contractimpl, contracttype, Address, Env};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum BlockableCurrencyError {
    RecipientBlocked = 1,
    InsufficientBalance = 2,
}

#[contracttype]
enum CurrencyKey {
    Balance(Address),
    Blocked(Address),
}

#[contract]
pub struct BlockableCurrency;

#[contractimpl]
impl BlockableCurrency {
    pub fn mint(env: Env, to: Address, amount: i128) {
        let balance = Self::balance(env.clone(), to.clone());
        env.storage()
            .persistent()
            .set(&CurrencyKey::Balance(to), &(balance + amount));
    }

    pub fn block(env: Env, who: Address) {
        env.storage()
            .persistent()
            .set(&CurrencyKey::Blocked(who), &true);
    }

    pub fn unblock(env: Env, who: Address) {
        env.storage()
            .persistent()
            .remove(&CurrencyKey::Blocked(who));
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&CurrencyKey::Balance(id))
            .unwrap_or(0)
    }

    pub fn transfer(
        env: Env,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), BlockableCurrencyError> {
        let blocked: bool = env
            .storage()
            .persistent()
            .get(&CurrencyKey::Blocked(to.clone()))
            .unwrap_or(false);
        if blocked {
            return Err(BlockableCurrencyError::RecipientBlocked);
        }

        let from_balance = Self::balance(env.clone(), from.clone());
        if from_balance < amount {
            return Err(BlockableCurrencyError::InsufficientBalance);
        }
        let to_balance = Self::balance(env.clone(), to.clone());
        env.storage()
            .persistent()
            .set(&CurrencyKey::Balance(from), &(from_balance - amount));
        env.storage()
            .persistent()
            .set(&CurrencyKey::Balance(to), &(to_balance + amount));
        Ok(())
    }
}
