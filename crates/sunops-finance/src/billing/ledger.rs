//! Transaction ledger
//!
//! Records money movements (project down payments, equipment costs,
//! commissions) and tracks them from pending to paid or overdue.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use sunops_common::{
    LedgerError, NewTransaction, Result, Transaction, TransactionKind, TransactionStatus,
    DOWN_PAYMENT_DUE_DAYS, DOWN_PAYMENT_RATE,
};
use tracing::{debug, info, instrument};

use crate::store::TransactionStore;

/// Statuses an entry can be settled from
const UNPAID: &[TransactionStatus] = &[
    TransactionStatus::Pendente,
    TransactionStatus::Atrasada,
    TransactionStatus::Cancelada,
];

/// Ledger operations over a transaction store
#[derive(Clone)]
pub struct TransactionLedger {
    store: Arc<dyn TransactionStore>,
}

impl TransactionLedger {
    pub fn new(store: Arc<dyn TransactionStore>) -> Self {
        Self { store }
    }

    /// Validate and store a new entry
    #[instrument(skip(self, transaction), fields(kind = ?transaction.kind, amount = %transaction.amount))]
    pub async fn record(&self, transaction: NewTransaction, now: DateTime<Utc>) -> Result<Transaction> {
        transaction.validate()?;
        let stored = self.store.insert(transaction, now).await?;
        debug!(id = stored.id, "Recorded transaction");
        Ok(stored)
    }

    /// Latest due date first; entries without a due date last, then by id
    pub async fn list(&self) -> Result<Vec<Transaction>> {
        let mut all = self.store.list().await?;
        all.sort_by(by_due_date_desc);
        Ok(all)
    }

    pub async fn get(&self, id: i64) -> Result<Transaction> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| LedgerError::NotFound(id).into())
    }

    /// Settle an entry
    #[instrument(skip(self))]
    pub async fn mark_paid(&self, id: i64, now: DateTime<Utc>) -> Result<Transaction> {
        let Some(transaction) = self
            .store
            .update_status(id, UNPAID, TransactionStatus::Paga, Some(now))
            .await?
        else {
            return Err(LedgerError::AlreadyPaid(id).into());
        };

        info!(id, amount = %transaction.amount, "Transaction paid");
        Ok(transaction)
    }

    /// Flag pending entries past their due date as overdue and return them
    ///
    /// Entries settled after the snapshot was taken keep their status.
    #[instrument(skip(self))]
    pub async fn flag_overdue(&self, today: NaiveDate) -> Result<Vec<Transaction>> {
        let mut flagged = Vec::new();
        for candidate in self.store.list().await? {
            if !candidate.is_overdue(today) {
                continue;
            }
            let updated = self
                .store
                .update_status(
                    candidate.id,
                    &[TransactionStatus::Pendente],
                    TransactionStatus::Atrasada,
                    None,
                )
                .await?;
            flagged.extend(updated);
        }

        flagged.sort_by(by_due_date_desc);
        if !flagged.is_empty() {
            info!(count = flagged.len(), "Flagged overdue transactions");
        }
        Ok(flagged)
    }

    /// Bill the down payment of a won project
    ///
    /// 30% of the project value, due five days after `today`.
    #[instrument(skip(self, client_name))]
    pub async fn open_project_down_payment(
        &self,
        project_id: i64,
        client_name: &str,
        project_value: Decimal,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<Transaction> {
        let amount = project_value
            .checked_mul(DOWN_PAYMENT_RATE)
            .ok_or_else(|| LedgerError::Invalid("valor do projeto fora do intervalo".to_string()))?;
        let due = today + Duration::days(DOWN_PAYMENT_DUE_DAYS);

        let entry = NewTransaction::new(
            format!("Pagamento da entrada do Projeto {client_name}"),
            amount,
            TransactionKind::EntradaProjeto,
        )
        .due_on(due)
        .for_project(project_id);

        self.record(entry, now).await
    }
}

fn by_due_date_desc(a: &Transaction, b: &Transaction) -> Ordering {
    match (a.due_date, b.due_date) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.id.cmp(&b.id))
}

impl std::fmt::Debug for TransactionLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionLedger").finish_non_exhaustive()
    }
}
