//! # SunOps Common
//!
//! Shared types and errors for the SunOps financial services.
//!
//! ## Core Types
//!
//! - [`Premissa`]: time-boxed pricing assumption set (power tiers + regional taxes)
//! - [`GlobalPricingConfig`]: default margin and commission rates
//! - [`PriceCalculationRequest`]/[`PriceCalculationResult`]: pricing calculation types
//! - [`Transaction`]: ledger entry (down payments, costs, commissions)

pub mod error;
pub mod types;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// Re-export commonly used types at crate root
pub use error::{LedgerError, PremissaError, PricingError, Result, SunOpsError};
pub use types::{
    calculation::{PriceCalculationRequest, PriceCalculationResult, RateSource, ResolutionPath},
    premissa::{normalize_region, NewPremissa, PowerTier, Premissa, RegionalTax},
    settings::{GlobalPricingConfig, ShowGlobalPricingConfig},
    transaction::{NewTransaction, Transaction, TransactionKind, TransactionStatus},
};

/// SunOps version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Unit prices are per Wp, requested power is in kW
pub const WATTS_PER_KILOWATT: i64 = 1000;

/// Default profit margin (20%)
pub const DEFAULT_MARGIN_RATE: Decimal = dec!(0.20);

/// Default sales commission (5%)
pub const DEFAULT_COMMISSION_RATE: Decimal = dec!(0.05);

/// Share of a won project's value billed as down payment (30%)
pub const DOWN_PAYMENT_RATE: Decimal = dec!(0.30);

/// Days until a down payment falls due
pub const DOWN_PAYMENT_DUE_DAYS: i64 = 5;
