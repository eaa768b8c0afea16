//! Price calculation

use axum::extract::State;
use axum::Json;
use sunops_common::{PriceCalculationRequest, PriceCalculationResult};

use crate::error::{ApiResult, AppJson};
use crate::AppState;

pub async fn calcular_preco(
    State(state): State<AppState>,
    AppJson(request): AppJson<PriceCalculationRequest>,
) -> ApiResult<Json<PriceCalculationResult>> {
    let result = state.finance.engine.calculate(&request).await?;
    Ok(Json(result))
}
