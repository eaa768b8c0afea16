//! Global pricing defaults

use axum::extract::State;
use axum::Json;
use sunops_common::{GlobalPricingConfig, ShowGlobalPricingConfig};
use sunops_finance::SettingsStore;
use tracing::info;

use crate::error::{ApiResult, AppJson};
use crate::AppState;

pub async fn get_configuracoes(
    State(state): State<AppState>,
) -> ApiResult<Json<ShowGlobalPricingConfig>> {
    let config = state.finance.settings.get_defaults().await?;
    Ok(Json(config.into()))
}

pub async fn update_configuracoes(
    State(state): State<AppState>,
    AppJson(config): AppJson<GlobalPricingConfig>,
) -> ApiResult<Json<ShowGlobalPricingConfig>> {
    let updated = state.finance.settings.update_defaults(config).await?;
    info!(
        margin = %updated.default_margin,
        commission = %updated.default_commission,
        "Pricing defaults updated"
    );
    Ok(Json(updated.into()))
}
