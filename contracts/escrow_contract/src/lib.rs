#![no_std]
mod error;
pub mod escrow;
pub mod oracle_interface;
pub mod policy;
pub mod storage_types;

pub use error::EscrowError;
