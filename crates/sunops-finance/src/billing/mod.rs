//! Billing for SunOps projects

pub mod ledger;

pub use ledger::TransactionLedger;
