use soroban_sdk::{
    auth::{ContractContext, InvokerContractAuthEntry, SubContractInvocation},
    contract, contractimpl, log, panic_with_error, symbol_short, token, vec, Address, BytesN, Env,
    IntoVal, Symbol,
};

use crate::{
    error::EscrowError,
    oracle_interface::{Callback, LedgerClient, OracleClient},
    policy::Resolution,
    storage_types::{DataKey, EscrowConfig, EscrowStatus},
};

/// Holds the depositor's funds until the oracle reports an ETH/USD price,
/// then splits them between the beneficiary and the depositor.
#[contract]
pub struct EscrowContract;

#[contractimpl]
impl EscrowContract {
    pub fn __constructor(env: Env, owner: Address, config: EscrowConfig) {
        owner.require_auth();

        if config.oracle_fee < 0 || !config.policy.is_valid() {
            panic_with_error!(&env, EscrowError::InvalidConfig);
        }

        env.storage().persistent().set(&DataKey::Owner, &owner);
        env.storage().persistent().set(&DataKey::Config, &config);
        env.storage().persistent().set(&DataKey::Balance, &0_i128);
        env.storage()
            .persistent()
            .set(&DataKey::Status, &EscrowStatus::Empty);
    }

    pub fn deposit(env: Env, from: Address, amount: i128) -> Result<(), EscrowError> {
        from.require_auth();

        let config = Self::config(env.clone());
        if from != config.depositor {
            return Err(EscrowError::Unauthorized);
        }
        if amount <= 0 {
            return Err(EscrowError::AmountMustBePositive);
        }

        let balance = Self::balance(env.clone())
            .checked_add(amount)
            .ok_or(EscrowError::Overflow)?;

        let token_client = token::Client::new(&env, &config.asset);
        token_client.transfer(&from, &env.current_contract_address(), &amount);

        env.storage().persistent().set(&DataKey::Balance, &balance);

        if Self::pending_request(env.clone()).is_none() {
            env.storage()
                .persistent()
                .set(&DataKey::Status, &EscrowStatus::Funded);
        }

        env.events()
            .publish((Symbol::new(&env, "DepositMade"), from), amount);

        Ok(())
    }

    pub fn set_spec_id(env: Env, caller: Address, spec_id: BytesN<32>) -> Result<(), EscrowError> {
        caller.require_auth();

        if caller != Self::owner(env.clone()) {
            return Err(EscrowError::Unauthorized);
        }

        env.storage().persistent().set(&DataKey::SpecId, &spec_id);
        env.events()
            .publish((symbol_short!("SpecIdSet"),), spec_id);

        Ok(())
    }

    /// Owner-only. Asks the coordinator for a price and lets it collect
    /// the oracle fee from this contract's ledger account. The returned id
    /// is the only one `fulfill_ethereum_price` will accept.
    pub fn request_ethereum_price(env: Env, caller: Address) -> Result<BytesN<32>, EscrowError> {
        caller.require_auth();

        if caller != Self::owner(env.clone()) {
            return Err(EscrowError::Unauthorized);
        }

        if Self::balance(env.clone()) <= 0 {
            return Err(EscrowError::NoFunds);
        }

        let spec_id = Self::spec_id(env.clone());
        if spec_id == Self::unset_spec(&env) {
            return Err(EscrowError::NoSpec);
        }

        if Self::pending_request(env.clone()).is_some() {
            return Err(EscrowError::RequestInProgress);
        }

        if Self::status(env.clone()) == EscrowStatus::Failed {
            return Err(EscrowError::DepositRequired);
        }

        let config = Self::config(env.clone());
        let escrow = env.current_contract_address();

        if config.oracle_fee > 0 {
            let ledger_client = LedgerClient::new(&env, &config.ledger);
            if ledger_client.balance(&escrow) < config.oracle_fee {
                return Err(EscrowError::FeePaymentFailed);
            }

            // The coordinator pulls the fee, so the ledger sees it as the invoker.
            env.authorize_as_current_contract(vec![
                &env,
                InvokerContractAuthEntry::Contract(SubContractInvocation {
                    context: ContractContext {
                        contract: config.ledger.clone(),
                        fn_name: symbol_short!("transfer"),
                        args: vec![
                            &env,
                            escrow.into_val(&env),
                            config.oracle.into_val(&env),
                            config.oracle_fee.into_val(&env),
                        ],
                    },
                    sub_invocations: vec![&env],
                }),
            ]);
        }

        let oracle_client = OracleClient::new(&env, &config.oracle);
        let request_id = oracle_client.request(
            &escrow,
            &spec_id,
            &escrow,
            &Callback::FulfillEthereumPrice,
            &config.oracle_fee,
        );

        env.storage()
            .persistent()
            .set(&DataKey::PendingRequest, &request_id);
        env.storage()
            .persistent()
            .set(&DataKey::Status, &EscrowStatus::AwaitingPrice);

        log!(&env, "price requested", request_id.clone());
        env.events().publish(
            (Symbol::new(&env, "PriceRequested"), request_id.clone()),
            spec_id,
        );

        Ok(request_id)
    }

    /// Oracle callback. Only the configured coordinator can satisfy the
    /// auth check, and only for the pending request.
    pub fn fulfill_ethereum_price(
        env: Env,
        request_id: BytesN<32>,
        price: i128,
    ) -> Result<(), EscrowError> {
        let config = Self::config(env.clone());
        config.oracle.require_auth();

        match Self::pending_request(env.clone()) {
            Some(pending) if pending == request_id => {}
            _ => return Err(EscrowError::UnknownRequest),
        }

        let balance = Self::balance(env.clone());

        match config.policy.resolve(balance, price) {
            Resolution::Insufficient => {
                env.storage().persistent().remove(&DataKey::PendingRequest);
                env.storage()
                    .persistent()
                    .set(&DataKey::Status, &EscrowStatus::Failed);

                log!(&env, "escrow failed", price, balance);
                env.events().publish(
                    (Symbol::new(&env, "EscrowFailed"), request_id),
                    (price, balance),
                );
            }
            Resolution::Release {
                beneficiary_share,
                depositor_share,
            } => {
                // State is final before any funds leave the contract.
                env.storage().persistent().set(&DataKey::Balance, &0_i128);
                env.storage().persistent().remove(&DataKey::PendingRequest);
                env.storage()
                    .persistent()
                    .set(&DataKey::Status, &EscrowStatus::Transferred);

                let escrow = env.current_contract_address();
                let token_client = token::Client::new(&env, &config.asset);
                if beneficiary_share > 0 {
                    token_client.transfer(&escrow, &config.beneficiary, &beneficiary_share);
                }
                if depositor_share > 0 {
                    token_client.transfer(&escrow, &config.depositor, &depositor_share);
                }

                log!(&env, "escrow transferred", beneficiary_share, depositor_share);
                env.events().publish(
                    (Symbol::new(&env, "EscrowTransferred"), request_id),
                    (beneficiary_share, depositor_share),
                );
            }
        }

        Ok(())
    }

    /// Owner-only. Drops a pending request that the coordinator has already
    /// consumed without a successful callback, such as when a payout
    /// transfer failed inside `fulfill_ethereum_price`.
    pub fn clear_stale_request(env: Env, caller: Address) -> Result<(), EscrowError> {
        caller.require_auth();

        if caller != Self::owner(env.clone()) {
            return Err(EscrowError::Unauthorized);
        }

        let request_id = Self::pending_request(env.clone()).ok_or(EscrowError::UnknownRequest)?;

        let config = Self::config(env.clone());
        let oracle_client = OracleClient::new(&env, &config.oracle);
        if oracle_client.is_pending(&request_id) {
            return Err(EscrowError::RequestInProgress);
        }

        env.storage().persistent().remove(&DataKey::PendingRequest);
        env.storage()
            .persistent()
            .set(&DataKey::Status, &EscrowStatus::Funded);

        log!(&env, "stale request cleared", request_id.clone());
        env.events()
            .publish((Symbol::new(&env, "RequestCleared"), request_id), ());

        Ok(())
    }

    pub fn balance(env: Env) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Balance)
            .unwrap_or(0)
    }

    pub fn spec_id(env: Env) -> BytesN<32> {
        env.storage()
            .persistent()
            .get(&DataKey::SpecId)
            .unwrap_or(Self::unset_spec(&env))
    }

    pub fn pending_request(env: Env) -> Option<BytesN<32>> {
        env.storage().persistent().get(&DataKey::PendingRequest)
    }

    pub fn status(env: Env) -> EscrowStatus {
        env.storage()
            .persistent()
            .get(&DataKey::Status)
            .unwrap_or(EscrowStatus::Empty)
    }

    pub fn owner(env: Env) -> Address {
        env.storage().persistent().get(&DataKey::Owner).unwrap()
    }

    pub fn config(env: Env) -> EscrowConfig {
        env.storage().persistent().get(&DataKey::Config).unwrap()
    }

    fn unset_spec(env: &Env) -> BytesN<32> {
        BytesN::from_array(env, &[0u8; 32])
    }
}
