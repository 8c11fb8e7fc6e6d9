use soroban_sdk::{contract, contractimpl, log, symbol_short, Address, Env};

use crate::{error::LedgerError, storage::DataKey};

/// Fee token used to pay the oracle coordinator for price requests.
#[contract]
pub struct PaymentLedger;

#[contractimpl]
impl PaymentLedger {
    pub fn __constructor(env: Env, admin: Address) {
        admin.require_auth();
        env.storage().persistent().set(&DataKey::Admin, &admin);
    }

    pub fn mint(env: Env, to: Address, amount: i128) -> Result<(), LedgerError> {
        let admin: Address = Self::get_admin(&env);
        admin.require_auth();

        if amount <= 0 {
            return Err(LedgerError::AmountMustBePositive);
        }

        let balance = Self::balance(env.clone(), to.clone())
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        Self::set_balance(&env, &to, balance);

        env.events().publish((symbol_short!("Mint"), to), amount);
        Ok(())
    }

    /// Moves `amount` from `from` to `to`. Returns `false` without touching
    /// any balance when the amount is not positive, `from` is short, or the
    /// receiving balance would overflow.
    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> bool {
        from.require_auth();

        if amount <= 0 {
            return false;
        }

        let from_balance = Self::balance(env.clone(), from.clone());
        if from_balance < amount {
            log!(&env, "transfer rejected, insufficient balance", from, amount);
            return false;
        }

        if from == to {
            return true;
        }

        let to_balance = match Self::balance(env.clone(), to.clone()).checked_add(amount) {
            Some(balance) => balance,
            None => return false,
        };

        Self::set_balance(&env, &from, from_balance - amount);
        Self::set_balance(&env, &to, to_balance);

        env.events()
            .publish((symbol_short!("Transfer"), from, to), amount);

        true
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Balance(id))
            .unwrap_or(0)
    }

    fn set_balance(env: &Env, id: &Address, amount: i128) {
        env.storage()
            .persistent()
            .set(&DataKey::Balance(id.clone()), &amount);
    }

    fn get_admin(env: &Env) -> Address {
        env.storage().persistent().get(&DataKey::Admin).unwrap()
    }
}
