use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Debug)]
pub enum DataKey {
    Owner,
    Config,
    SpecId,
    Balance,
    PendingRequest,
    Status,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EscrowStatus {
    Empty,
    Funded,
    AwaitingPrice,
    Failed,
    Transferred,
}

/// Basis-point denominator for [`ReleasePolicy::beneficiary_bps`].
pub const MAX_BPS: i128 = 10_000;

/// Collateral requirement and payout split applied when the price arrives.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ReleasePolicy {
    /// Minimum fiat value, in the price feed's denomination, the held
    /// balance must reach for funds to be released.
    pub threshold: i128,
    /// Base units of the escrowed asset one price quote refers to.
    pub unit: i128,
    /// Share of the released balance paid to the beneficiary, out of
    /// [`MAX_BPS`]; the depositor receives the rest.
    pub beneficiary_bps: i128,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct EscrowConfig {
    pub depositor: Address,
    pub beneficiary: Address,
    /// Token contract holding the escrowed value.
    pub asset: Address,
    /// Fee ledger the oracle is paid through.
    pub ledger: Address,
    pub oracle: Address,
    pub oracle_fee: i128,
    pub policy: ReleasePolicy,
}
