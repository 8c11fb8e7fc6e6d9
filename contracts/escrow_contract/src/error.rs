use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum EscrowError {
    Unauthorized = 1,
    NoFunds = 2,
    NoSpec = 3,
    RequestInProgress = 4,
    UnknownRequest = 5,
    AmountMustBePositive = 6,
    DepositRequired = 7,
    FeePaymentFailed = 8,
    InvalidConfig = 9,
    Overflow = 10,
}
