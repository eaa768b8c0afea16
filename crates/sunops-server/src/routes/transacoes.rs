//! Ledger entries

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use sunops_common::{NewTransaction, Transaction, TransactionStatus};

use crate::error::{ApiResult, AppJson};
use crate::AppState;

pub async fn list_transacoes(State(state): State<AppState>) -> ApiResult<Json<Vec<Transaction>>> {
    Ok(Json(state.finance.ledger.list().await?))
}

pub async fn create_transacao(
    State(state): State<AppState>,
    AppJson(new): AppJson<NewTransaction>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    let transaction = state.finance.ledger.record(new, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

/// Flags pending entries past due, then lists everything overdue
pub async fn list_vencidas(State(state): State<AppState>) -> ApiResult<Json<Vec<Transaction>>> {
    let ledger = &state.finance.ledger;
    ledger.flag_overdue(Utc::now().date_naive()).await?;

    let overdue = ledger
        .list()
        .await?
        .into_iter()
        .filter(|t| t.status == TransactionStatus::Atrasada)
        .collect();
    Ok(Json(overdue))
}

pub async fn marcar_pago(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Transaction>> {
    Ok(Json(state.finance.ledger.mark_paid(id, Utc::now()).await?))
}
