use soroban_sdk::{contracttype, Address, BytesN, Env, Symbol};

#[contracttype]
#[derive(Clone, Debug)]
pub enum DataKey {
    Admin,
    Node,
    Ledger,
    Nonce,
    Withdrawable,
    Request(BytesN<32>),
}

/// Entry points a fulfilled request may call back into. Requesters pick one
/// of these instead of naming an arbitrary function.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Callback {
    FulfillEthereumPrice,
}

impl Callback {
    pub fn function(&self, env: &Env) -> Symbol {
        match self {
            Callback::FulfillEthereumPrice => Symbol::new(env, "fulfill_ethereum_price"),
        }
    }
}

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct OracleRequest {
    pub requester: Address,
    pub spec_id: BytesN<32>,
    pub callback_target: Address,
    pub callback: Callback,
    pub payment: i128,
    pub fulfilled: bool,
}
