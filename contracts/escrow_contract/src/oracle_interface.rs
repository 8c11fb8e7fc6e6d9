use soroban_sdk::{contractclient, contracttype, Address, BytesN, Env};

/// Callback selector understood by the oracle coordinator. Variant names
/// must match the coordinator's `Callback` enum.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Callback {
    FulfillEthereumPrice,
}

#[contractclient(name = "OracleClient")]
pub trait OracleCoordinatorInterface {
    fn request(
        env: Env,
        requester: Address,
        spec_id: BytesN<32>,
        callback_target: Address,
        callback: Callback,
        payment: i128,
    ) -> BytesN<32>;

    fn is_pending(env: Env, request_id: BytesN<32>) -> bool;
}

#[contractclient(name = "LedgerClient")]
pub trait PaymentLedgerInterface {
    fn balance(env: Env, id: Address) -> i128;
}
