use soroban_sdk::{
    contract, contractclient, contractimpl, log, symbol_short, vec, xdr::ToXdr, Address, BytesN,
    Env, IntoVal, Symbol,
};

use crate::{
    error::OracleError,
    storage_types::{Callback, DataKey, OracleRequest},
};

#[contractclient(name = "LedgerClient")]
pub trait PaymentLedgerInterface {
    fn transfer(env: Env, from: Address, to: Address, amount: i128) -> bool;
}

/// Matches outbound data requests to the single fulfillment the node is
/// allowed to deliver for each of them.
#[contract]
pub struct OracleCoordinator;

#[contractimpl]
impl OracleCoordinator {
    pub fn __constructor(env: Env, admin: Address, ledger: Address) {
        admin.require_auth();
        env.storage().persistent().set(&DataKey::Admin, &admin);
        env.storage().persistent().set(&DataKey::Node, &admin);
        env.storage().persistent().set(&DataKey::Ledger, &ledger);
        env.storage().persistent().set(&DataKey::Nonce, &0_u64);
        env.storage()
            .persistent()
            .set(&DataKey::Withdrawable, &0_i128);
    }

    /// Registers a request and collects `payment` from the requester's
    /// ledger account.
    pub fn request(
        env: Env,
        requester: Address,
        spec_id: BytesN<32>,
        callback_target: Address,
        callback: Callback,
        payment: i128,
    ) -> Result<BytesN<32>, OracleError> {
        requester.require_auth();

        if payment < 0 {
            return Err(OracleError::InvalidPayment);
        }

        let nonce: u64 = env
            .storage()
            .persistent()
            .get(&DataKey::Nonce)
            .unwrap_or(0);
        let next_nonce = nonce.checked_add(1).ok_or(OracleError::Overflow)?;
        let withdrawable = Self::withdrawable(env.clone())
            .checked_add(payment)
            .ok_or(OracleError::Overflow)?;

        if payment > 0 {
            let ledger_client = LedgerClient::new(&env, &Self::ledger(&env));
            if !ledger_client.transfer(&requester, &env.current_contract_address(), &payment) {
                return Err(OracleError::PaymentFailed);
            }
        }

        let request_id = Self::derive_request_id(&env, &requester, nonce, &spec_id);
        env.storage().persistent().set(&DataKey::Nonce, &next_nonce);

        let request = OracleRequest {
            requester: requester.clone(),
            spec_id: spec_id.clone(),
            callback_target,
            callback,
            payment,
            fulfilled: false,
        };
        env.storage()
            .persistent()
            .set(&DataKey::Request(request_id.clone()), &request);
        env.storage()
            .persistent()
            .set(&DataKey::Withdrawable, &withdrawable);

        env.events().publish(
            (Symbol::new(&env, "OracleRequest"), request_id.clone()),
            (spec_id, requester, payment),
        );

        Ok(request_id)
    }

    /// Delivers `value` for `request_id` and calls the requester back.
    ///
    /// The request is consumed before the callback runs. A failing callback
    /// only rolls back its own effects; the return value reports whether it
    /// succeeded.
    pub fn fulfill_data(
        env: Env,
        caller: Address,
        request_id: BytesN<32>,
        value: i128,
    ) -> Result<bool, OracleError> {
        caller.require_auth();

        if caller != Self::node(env.clone()) {
            return Err(OracleError::Unauthorized);
        }

        let key = DataKey::Request(request_id.clone());
        let mut request: OracleRequest = match env.storage().persistent().get(&key) {
            Some(request) => request,
            None => return Err(OracleError::UnknownRequest),
        };
        if request.fulfilled {
            return Err(OracleError::UnknownRequest);
        }

        request.fulfilled = true;
        env.storage().persistent().set(&key, &request);

        let outcome = env.try_invoke_contract::<(), soroban_sdk::Error>(
            &request.callback_target,
            &request.callback.function(&env),
            vec![&env, request_id.into_val(&env), value.into_val(&env)],
        );
        let delivered = matches!(outcome, Ok(Ok(())));
        if !delivered {
            log!(&env, "callback failed", request_id.clone(), request.callback_target);
        }

        env.events().publish(
            (Symbol::new(&env, "OracleFulfilled"), request_id),
            (value, delivered),
        );

        Ok(delivered)
    }

    pub fn transfer_ownership(
        env: Env,
        caller: Address,
        new_node: Address,
    ) -> Result<(), OracleError> {
        caller.require_auth();

        if caller != Self::admin(env.clone()) {
            return Err(OracleError::Unauthorized);
        }

        env.storage().persistent().set(&DataKey::Node, &new_node);
        env.events()
            .publish((Symbol::new(&env, "NodeChanged"),), new_node);
        Ok(())
    }

    /// Pays collected request fees out of the coordinator's ledger account.
    pub fn withdraw(
        env: Env,
        caller: Address,
        recipient: Address,
        amount: i128,
    ) -> Result<(), OracleError> {
        caller.require_auth();

        if caller != Self::admin(env.clone()) {
            return Err(OracleError::Unauthorized);
        }

        let withdrawable = Self::withdrawable(env.clone());
        if amount <= 0 || amount > withdrawable {
            return Err(OracleError::InsufficientWithdrawable);
        }

        env.storage()
            .persistent()
            .set(&DataKey::Withdrawable, &(withdrawable - amount));

        let ledger_client = LedgerClient::new(&env, &Self::ledger(&env));
        if !ledger_client.transfer(&env.current_contract_address(), &recipient, &amount) {
            return Err(OracleError::PaymentFailed);
        }

        env.events()
            .publish((symbol_short!("Withdrawn"), recipient), amount);
        Ok(())
    }

    pub fn node(env: Env) -> Address {
        env.storage().persistent().get(&DataKey::Node).unwrap()
    }

    pub fn admin(env: Env) -> Address {
        env.storage().persistent().get(&DataKey::Admin).unwrap()
    }

    pub fn withdrawable(env: Env) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Withdrawable)
            .unwrap_or(0)
    }

    pub fn get_request(env: Env, request_id: BytesN<32>) -> Option<OracleRequest> {
        env.storage().persistent().get(&DataKey::Request(request_id))
    }

    /// True while the request exists and is still waiting for the node.
    pub fn is_pending(env: Env, request_id: BytesN<32>) -> bool {
        Self::get_request(env, request_id).is_some_and(|request| !request.fulfilled)
    }

    fn ledger(env: &Env) -> Address {
        env.storage().persistent().get(&DataKey::Ledger).unwrap()
    }

    // The nonce never repeats, so ids stay unique even for identical queries.
    fn derive_request_id(
        env: &Env,
        requester: &Address,
        nonce: u64,
        spec_id: &BytesN<32>,
    ) -> BytesN<32> {
        let mut preimage = requester.clone().to_xdr(env);
        preimage.append(&nonce.to_xdr(env));
        preimage.append(&spec_id.clone().into());
        env.crypto().sha256(&preimage).to_bytes()
    }
}
