//! Ledger entries tracked by the financial module

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Kind of money movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Down payment of a won project
    EntradaProjeto,
    CustoEquipamento,
    ComissaoAPagar,
    OutraReceita,
    OutraDespesa,
}

/// Payment status of a ledger entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    #[default]
    Pendente,
    Paga,
    /// Pending past its due date
    Atrasada,
    Cancelada,
}

/// Stored ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,

    #[serde(rename = "descricao")]
    pub description: String,

    #[serde(rename = "valor")]
    pub amount: Decimal,

    #[serde(rename = "tipo")]
    pub kind: TransactionKind,

    pub status: TransactionStatus,

    #[serde(rename = "data_criacao")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "data_vencimento", default)]
    pub due_date: Option<NaiveDate>,

    #[serde(rename = "data_pagamento", default)]
    pub paid_at: Option<DateTime<Utc>>,

    #[serde(rename = "projeto_id", default)]
    pub project_id: Option<i64>,

    /// Seller owed a commission, if any
    #[serde(rename = "vendedor_id", default)]
    pub seller_id: Option<i64>,
}

impl Transaction {
    pub fn from_new(id: i64, new: NewTransaction, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            description: new.description,
            amount: new.amount,
            kind: new.kind,
            status: new.status,
            created_at,
            due_date: new.due_date,
            paid_at: None,
            project_id: new.project_id,
            seller_id: new.seller_id,
        }
    }

    /// Pending with a due date strictly before `today`
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status == TransactionStatus::Pendente
            && self.due_date.is_some_and(|due| due < today)
    }
}

/// Input for recording a ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    #[serde(rename = "descricao")]
    pub description: String,

    #[serde(rename = "valor")]
    pub amount: Decimal,

    #[serde(rename = "tipo")]
    pub kind: TransactionKind,

    #[serde(default)]
    pub status: TransactionStatus,

    #[serde(rename = "data_vencimento", default)]
    pub due_date: Option<NaiveDate>,

    #[serde(rename = "projeto_id", default)]
    pub project_id: Option<i64>,

    #[serde(rename = "vendedor_id", default)]
    pub seller_id: Option<i64>,
}

impl NewTransaction {
    pub fn new(description: impl Into<String>, amount: Decimal, kind: TransactionKind) -> Self {
        Self {
            description: description.into(),
            amount,
            kind,
            status: TransactionStatus::Pendente,
            due_date: None,
            project_id: None,
            seller_id: None,
        }
    }

    pub fn due_on(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn for_project(mut self, project_id: i64) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn for_seller(mut self, seller_id: i64) -> Self {
        self.seller_id = Some(seller_id);
        self
    }

    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.description.trim().is_empty() {
            return Err(LedgerError::Invalid("descricao é obrigatória".to_string()));
        }
        if self.amount <= Decimal::ZERO {
            return Err(LedgerError::Invalid(format!(
                "valor deve ser positivo (recebido {})",
                self.amount
            )));
        }
        Ok(())
    }
}
