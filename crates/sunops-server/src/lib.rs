//! # SunOps Server
//!
//! HTTP API over the SunOps pricing engine and transaction ledger.
//!
//! ## Endpoints
//!
//! - `POST /financeiro/calcular-preco`: itemized price for a power rating
//! - `/financeiro/premissas`: pricing assumption sets
//! - `/financeiro/configuracoes`: global margin and commission defaults
//! - `/financeiro/transacoes`: ledger entries, overdue flagging and payment

pub mod config;
pub mod error;
pub mod routes;
pub mod seed;

use sunops_finance::Finance;

pub use config::{LogFormat, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use routes::router;

/// Shared handler state
#[derive(Clone, Debug)]
pub struct AppState {
    pub finance: Finance,
}

impl AppState {
    pub fn new(finance: Finance) -> Self {
        Self { finance }
    }
}
