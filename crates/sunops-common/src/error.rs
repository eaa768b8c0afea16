//! Error types for SunOps financial services
//!
//! Provides a unified error type and domain-specific error variants

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Result type alias using SunOpsError
pub type Result<T> = std::result::Result<T, SunOpsError>;

/// Unified error type for SunOps operations
#[derive(Debug, Error)]
pub enum SunOpsError {
    // Pricing engine errors
    #[error("{0}")]
    Pricing(#[from] PricingError),

    // Premissa administration errors
    #[error("{0}")]
    Premissa(#[from] PremissaError),

    // Ledger errors
    #[error("{0}")]
    Ledger(#[from] LedgerError),

    // Input validation outside the pricing path
    #[error("Dados inválidos: {0}")]
    Validation(String),

    // Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Price calculation errors
///
/// Each variant maps to a message the calculator form can show as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("Premissa {0} não encontrada")]
    NotFound(i64),

    #[error("Nenhuma premissa ativa e vigente para a data {0}")]
    NoApplicablePremissa(NaiveDate),

    #[error("Potência de {power} kW abaixo da faixa mínima ({minimum} kW)")]
    PowerBelowRange { power: Decimal, minimum: Decimal },

    #[error("Potência de {power} kW não pertence a nenhuma faixa da premissa")]
    PowerOutsideTiers { power: Decimal },

    #[error("Região '{0}' sem alíquota de imposto cadastrada")]
    UnknownRegion(String),

    #[error("Requisição inválida: {0}")]
    Validation(String),

    #[error("Valores da requisição excedem o limite de cálculo")]
    Overflow,
}

/// Premissa administration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PremissaError {
    #[error("Premissa {0} não encontrada")]
    NotFound(i64),

    #[error("Premissa inválida: {0}")]
    Invalid(String),
}

/// Transaction ledger errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Transação {0} não encontrada")]
    NotFound(i64),

    #[error("Transação {0} já está paga")]
    AlreadyPaid(i64),

    #[error("Transação inválida: {0}")]
    Invalid(String),
}

impl SunOpsError {
    /// Shorthand for request validation failures on the pricing path
    pub fn validation(msg: impl Into<String>) -> Self {
        SunOpsError::Pricing(PricingError::Validation(msg.into()))
    }
}

impl From<serde_json::Error> for SunOpsError {
    fn from(err: serde_json::Error) -> Self {
        SunOpsError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for SunOpsError {
    fn from(err: std::io::Error) -> Self {
        SunOpsError::Storage(err.to_string())
    }
}

impl From<anyhow::Error> for SunOpsError {
    fn from(err: anyhow::Error) -> Self {
        SunOpsError::Internal(err.to_string())
    }
}
