//! Pricing module
//!
//! Premissa-based price calculation:
//! - Premissa resolution (explicit id or vigency with deterministic tie-break)
//! - Power tier selection with an open-ended top tier
//! - Regional tax lookup with override
//! - Decimal-exact derivation pipeline

pub mod engine;
pub mod pipeline;
pub mod resolver;
pub mod tax;
pub mod tiers;

pub use engine::PricingEngine;
pub use pipeline::{derive_price, PriceBreakdown, PriceInputs};
pub use resolver::{resolve_premissa, select_vigent, ResolvedPremissa};
pub use tax::{resolve_tax, TaxResolution};
pub use tiers::{select_tier, TierMatch};
