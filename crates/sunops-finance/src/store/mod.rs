//! Storage collaborators
//!
//! The pricing engine and the ledger only see these traits; callers inject
//! the backend they want. In-memory implementations live in [`memory`].

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sunops_common::{
    GlobalPricingConfig, NewPremissa, NewTransaction, Premissa, Result, Transaction,
    TransactionStatus,
};

pub use memory::{InMemoryPremissaRepository, InMemorySettingsStore, InMemoryTransactionStore};

/// Store of pricing assumption sets
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PremissaRepository: Send + Sync {
    /// Fetch one premissa regardless of its active flag or window
    async fn get_by_id(&self, id: i64) -> Result<Option<Premissa>>;

    /// Active premissas whose validity window contains `date`
    async fn find_active_for_date(&self, date: NaiveDate) -> Result<Vec<Premissa>>;

    /// All premissas ordered by id
    async fn list(&self) -> Result<Vec<Premissa>>;

    /// Validate and store a new premissa, assigning ids
    async fn create(&self, premissa: NewPremissa) -> Result<Premissa>;

    /// Replace an existing premissa
    async fn update(&self, id: i64, premissa: NewPremissa) -> Result<Premissa>;

    async fn delete(&self, id: i64) -> Result<()>;
}

/// Store of the global pricing defaults (singleton)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get_defaults(&self) -> Result<GlobalPricingConfig>;

    /// Validate and replace the defaults
    async fn update_defaults(&self, config: GlobalPricingConfig) -> Result<GlobalPricingConfig>;
}

/// Store of ledger entries
#[async_trait]
pub trait TransactionStore: Send + Sync {
    async fn insert(&self, transaction: NewTransaction, created_at: DateTime<Utc>) -> Result<Transaction>;

    async fn get(&self, id: i64) -> Result<Option<Transaction>>;

    async fn list(&self) -> Result<Vec<Transaction>>;

    /// Move an entry to `status` only if its current status is in `from`
    ///
    /// The check and the write happen atomically. Returns `None` when the
    /// entry exists but its status did not match; `paid_at` is set only when
    /// given.
    async fn update_status(
        &self,
        id: i64,
        from: &[TransactionStatus],
        status: TransactionStatus,
        paid_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Transaction>>;
}
