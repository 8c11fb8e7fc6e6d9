#![no_std]
mod error;
pub mod oracle;
pub mod storage_types;

pub use error::OracleError;
