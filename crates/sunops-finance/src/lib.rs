//! # SunOps Finance
//!
//! Premissa-based pricing engine and transaction ledger for SunOps.
//!
//! ## Pricing Formula
//!
//! ```text
//! Final = (Base + Costs) × (1 + Margin + Commission) × (1 + Tax)
//! ```
//!
//! Where:
//! - Base: unit price of the matching power tier (per Wp) × kW × 1000
//! - Costs: additional project costs
//! - Margin/Commission: request override, else the global default
//! - Tax: request override, else the premissa's rate for the region

pub mod billing;
pub mod pricing;
pub mod store;

use std::sync::Arc;

use sunops_common::GlobalPricingConfig;

pub use billing::TransactionLedger;
pub use pricing::PricingEngine;
pub use store::{
    InMemoryPremissaRepository, InMemorySettingsStore, InMemoryTransactionStore,
    PremissaRepository, SettingsStore, TransactionStore,
};

/// Finance services sharing one set of stores
#[derive(Clone)]
pub struct Finance {
    pub premissas: Arc<dyn PremissaRepository>,
    pub settings: Arc<dyn SettingsStore>,
    pub engine: PricingEngine,
    pub ledger: TransactionLedger,
}

impl Finance {
    pub fn new(
        premissas: Arc<dyn PremissaRepository>,
        settings: Arc<dyn SettingsStore>,
        transactions: Arc<dyn TransactionStore>,
    ) -> Self {
        Self {
            engine: PricingEngine::new(premissas.clone(), settings.clone()),
            ledger: TransactionLedger::new(transactions),
            premissas,
            settings,
        }
    }

    /// Fresh in-memory stores
    pub fn in_memory(defaults: GlobalPricingConfig) -> Self {
        Self::new(
            Arc::new(InMemoryPremissaRepository::new()),
            Arc::new(InMemorySettingsStore::new(defaults)),
            Arc::new(InMemoryTransactionStore::new()),
        )
    }
}

impl std::fmt::Debug for Finance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Finance")
            .field("engine", &self.engine)
            .field("ledger", &self.ledger)
            .finish_non_exhaustive()
    }
}
