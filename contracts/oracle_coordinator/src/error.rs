use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum OracleError {
    Unauthorized = 1,
    UnknownRequest = 2,
    InvalidPayment = 3,
    InsufficientWithdrawable = 4,
    PaymentFailed = 5,
    Overflow = 6,
}
