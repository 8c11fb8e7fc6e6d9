#![no_std]
mod error;
pub mod ledger;
mod storage;

pub use error::LedgerError;
