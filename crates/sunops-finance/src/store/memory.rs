//! In-memory storage implementations
//!
//! DashMap-backed stores for premissas and ledger entries, and a
//! lock-guarded singleton for the global pricing defaults.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use dashmap::DashMap;
use parking_lot::RwLock;
use sunops_common::{
    GlobalPricingConfig, LedgerError, NewPremissa, NewTransaction, Premissa, PremissaError,
    Result, Transaction, TransactionStatus,
};
use tracing::{debug, instrument};

use super::{PremissaRepository, SettingsStore, TransactionStore};

/// In-memory premissa repository
pub struct InMemoryPremissaRepository {
    /// All premissas by ID
    premissas: DashMap<i64, Premissa>,

    next_id: AtomicI64,

    /// Shared sequence for tier and region ids
    next_child_id: AtomicI64,
}

impl InMemoryPremissaRepository {
    pub fn new() -> Self {
        Self {
            premissas: DashMap::new(),
            next_id: AtomicI64::new(1),
            next_child_id: AtomicI64::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.premissas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.premissas.is_empty()
    }

    fn assign_child_ids(&self, premissa: &mut NewPremissa) {
        for tier in &mut premissa.tiers {
            tier.id = self.next_child_id.fetch_add(1, Ordering::SeqCst);
        }
        for tax in &mut premissa.regional_taxes {
            tax.id = self.next_child_id.fetch_add(1, Ordering::SeqCst);
        }
    }
}

impl Default for InMemoryPremissaRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PremissaRepository for InMemoryPremissaRepository {
    async fn get_by_id(&self, id: i64) -> Result<Option<Premissa>> {
        Ok(self.premissas.get(&id).map(|p| p.clone()))
    }

    async fn find_active_for_date(&self, date: NaiveDate) -> Result<Vec<Premissa>> {
        let mut found: Vec<Premissa> = self
            .premissas
            .iter()
            .filter(|p| p.is_vigent(date))
            .map(|p| p.clone())
            .collect();
        found.sort_by_key(|p| p.id);
        Ok(found)
    }

    async fn list(&self) -> Result<Vec<Premissa>> {
        let mut all: Vec<Premissa> = self.premissas.iter().map(|p| p.clone()).collect();
        all.sort_by_key(|p| p.id);
        Ok(all)
    }

    #[instrument(skip(self, premissa), fields(name = %premissa.name))]
    async fn create(&self, mut premissa: NewPremissa) -> Result<Premissa> {
        premissa.validate()?;
        self.assign_child_ids(&mut premissa);

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let stored = Premissa::from_new(id, premissa);
        self.premissas.insert(id, stored.clone());

        debug!(id, "Stored premissa");
        Ok(stored)
    }

    #[instrument(skip(self, premissa))]
    async fn update(&self, id: i64, mut premissa: NewPremissa) -> Result<Premissa> {
        premissa.validate()?;

        let Some(mut entry) = self.premissas.get_mut(&id) else {
            return Err(PremissaError::NotFound(id).into());
        };
        self.assign_child_ids(&mut premissa);
        *entry = Premissa::from_new(id, premissa);

        debug!(id, "Replaced premissa");
        Ok(entry.clone())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<()> {
        match self.premissas.remove(&id) {
            Some(_) => Ok(()),
            None => Err(PremissaError::NotFound(id).into()),
        }
    }
}

/// In-memory global pricing defaults
pub struct InMemorySettingsStore {
    config: RwLock<GlobalPricingConfig>,
}

impl InMemorySettingsStore {
    pub fn new(config: GlobalPricingConfig) -> Self {
        Self {
            config: RwLock::new(config),
        }
    }
}

impl Default for InMemorySettingsStore {
    fn default() -> Self {
        Self::new(GlobalPricingConfig::default())
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn get_defaults(&self) -> Result<GlobalPricingConfig> {
        Ok(*self.config.read())
    }

    #[instrument(skip(self))]
    async fn update_defaults(&self, config: GlobalPricingConfig) -> Result<GlobalPricingConfig> {
        config.validate()?;
        *self.config.write() = config;
        Ok(config)
    }
}

/// In-memory ledger storage
pub struct InMemoryTransactionStore {
    transactions: DashMap<i64, Transaction>,
    next_id: AtomicI64,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self {
            transactions: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryTransactionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn insert(&self, transaction: NewTransaction, created_at: DateTime<Utc>) -> Result<Transaction> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let stored = Transaction::from_new(id, transaction, created_at);
        self.transactions.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get(&self, id: i64) -> Result<Option<Transaction>> {
        Ok(self.transactions.get(&id).map(|t| t.clone()))
    }

    async fn list(&self) -> Result<Vec<Transaction>> {
        Ok(self.transactions.iter().map(|t| t.clone()).collect())
    }

    async fn update_status(
        &self,
        id: i64,
        from: &[TransactionStatus],
        status: TransactionStatus,
        paid_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Transaction>> {
        // The entry guard holds the shard lock across check and write
        let Some(mut entry) = self.transactions.get_mut(&id) else {
            return Err(LedgerError::NotFound(id).into());
        };
        if !from.contains(&entry.status) {
            return Ok(None);
        }
        entry.status = status;
        if paid_at.is_some() {
            entry.paid_at = paid_at;
        }
        Ok(Some(entry.clone()))
    }
}
