//! Premissa administration

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use sunops_common::{NewPremissa, Premissa, PremissaError, SunOpsError};
use sunops_finance::PremissaRepository;
use tracing::info;

use crate::error::{ApiResult, AppJson};
use crate::AppState;

pub async fn list_premissas(State(state): State<AppState>) -> ApiResult<Json<Vec<Premissa>>> {
    Ok(Json(state.finance.premissas.list().await?))
}

pub async fn get_premissa(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Premissa>> {
    let premissa = state
        .finance
        .premissas
        .get_by_id(id)
        .await?
        .ok_or_else(|| SunOpsError::from(PremissaError::NotFound(id)))?;
    Ok(Json(premissa))
}

pub async fn create_premissa(
    State(state): State<AppState>,
    AppJson(new): AppJson<NewPremissa>,
) -> ApiResult<(StatusCode, Json<Premissa>)> {
    let premissa = state.finance.premissas.create(new).await?;
    info!(id = premissa.id, name = %premissa.name, "Premissa created");
    Ok((StatusCode::CREATED, Json(premissa)))
}

pub async fn update_premissa(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    AppJson(new): AppJson<NewPremissa>,
) -> ApiResult<Json<Premissa>> {
    let premissa = state.finance.premissas.update(id, new).await?;
    info!(id, "Premissa updated");
    Ok(Json(premissa))
}

pub async fn delete_premissa(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.finance.premissas.delete(id).await?;
    info!(id, "Premissa deleted");
    Ok(StatusCode::NO_CONTENT)
}
