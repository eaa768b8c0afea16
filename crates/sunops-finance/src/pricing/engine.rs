//! Premissa-based pricing engine
//!
//! Resolves the premissa, tier and tax for a request, reads the global
//! defaults, and runs the derivation pipeline. Collaborators are injected;
//! the engine keeps no state between calls.

use std::collections::BTreeMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::{json, Value};
use sunops_common::{
    PriceCalculationRequest, PriceCalculationResult, RateSource, ResolutionPath, Result,
};
use tracing::{info, instrument, warn};

use super::pipeline::{derive_price, PriceBreakdown, PriceInputs};
use super::resolver::{resolve_premissa, ResolvedPremissa};
use super::tax::{resolve_tax, TaxResolution};
use super::tiers::{select_tier, TierMatch};
use crate::store::{PremissaRepository, SettingsStore};

/// Pricing engine over a premissa repository and a settings store
#[derive(Clone)]
pub struct PricingEngine {
    premissas: Arc<dyn PremissaRepository>,
    settings: Arc<dyn SettingsStore>,
}

impl PricingEngine {
    pub fn new(premissas: Arc<dyn PremissaRepository>, settings: Arc<dyn SettingsStore>) -> Self {
        Self {
            premissas,
            settings,
        }
    }

    /// Calculate a fully itemized price
    ///
    /// Either every step succeeds and a result is returned, or the first
    /// failing step's error is returned and nothing else.
    #[instrument(skip(self, request), fields(power_kw = %request.power_kw, region = %request.region, date = %request.as_of_date))]
    pub async fn calculate(&self, request: &PriceCalculationRequest) -> Result<PriceCalculationResult> {
        match self.run(request).await {
            Ok(result) => {
                info!(
                    premissa_id = result.premissa_id,
                    tier = %result.tier_name,
                    final_price = %result.final_price,
                    "Price calculated"
                );
                Ok(result)
            }
            Err(err) => {
                warn!(error = %err, "Price calculation failed");
                Err(err)
            }
        }
    }

    async fn run(&self, request: &PriceCalculationRequest) -> Result<PriceCalculationResult> {
        request.validate()?;

        let resolved =
            resolve_premissa(self.premissas.as_ref(), request.premissa_id, request.as_of_date).await?;
        let tier = select_tier(&resolved.premissa, request.power_kw)?;
        let tax = resolve_tax(&resolved.premissa, &request.region, request.tax_override)?;

        let defaults = self.settings.get_defaults().await?;
        let (margin_rate, margin_source) = pick(request.margin_override, defaults.default_margin);
        let (commission_rate, commission_source) =
            pick(request.commission_override, defaults.default_commission);

        let breakdown = derive_price(&PriceInputs {
            unit_price_wp: tier.unit_price,
            power_kw: request.power_kw,
            additional_costs: request.additional_costs,
            margin_rate,
            commission_rate,
            tax_rate: tax.rate,
        })?;

        let details = details(&resolved, &tier, &tax, margin_source, commission_source);
        Ok(assemble(request, resolved, tier, breakdown, details))
    }
}

fn pick(override_rate: Option<Decimal>, default: Decimal) -> (Decimal, RateSource) {
    match override_rate {
        Some(rate) => (rate, RateSource::Override),
        None => (default, RateSource::Padrao),
    }
}

fn details(
    resolved: &ResolvedPremissa,
    tier: &TierMatch,
    tax: &TaxResolution,
    margin_source: RateSource,
    commission_source: RateSource,
) -> BTreeMap<String, Value> {
    let mut details = BTreeMap::new();
    details.insert("resolucao".to_string(), json!(resolved.path.as_str()));
    if resolved.path == ResolutionPath::AutomaticaPorData {
        details.insert("premissas_candidatas".to_string(), json!(resolved.candidates));
    }
    details.insert("faixa_potencia_min".to_string(), json!(tier.min_kw.to_string()));
    details.insert("faixa_potencia_max".to_string(), json!(tier.max_kw.to_string()));
    details.insert("faixa_topo_aberta".to_string(), json!(tier.open_top));
    details.insert("origem_margem".to_string(), json!(margin_source.as_str()));
    details.insert("origem_comissao".to_string(), json!(commission_source.as_str()));
    details.insert("origem_imposto".to_string(), json!(tax.source.as_str()));
    details
}

fn assemble(
    request: &PriceCalculationRequest,
    resolved: ResolvedPremissa,
    tier: TierMatch,
    b: PriceBreakdown,
    details: BTreeMap<String, Value>,
) -> PriceCalculationResult {
    PriceCalculationResult {
        power_kw: request.power_kw,
        region: request.region.trim().to_string(),
        calculation_date: request.as_of_date,
        premissa_id: resolved.premissa.id,
        premissa_name: resolved.premissa.name,
        tier_name: tier.name,
        unit_price_wp: tier.unit_price,
        base_price: b.base_price,
        additional_costs: b.additional_costs,
        cost_subtotal: b.cost_subtotal,
        margin_rate: b.margin_rate,
        margin_value: b.margin_value,
        commission_rate: b.commission_rate,
        commission_value: b.commission_value,
        subtotal_before_tax: b.subtotal_before_tax,
        tax_rate: b.tax_rate,
        tax_value: b.tax_value,
        final_price: b.final_price,
        details,
    }
}

impl std::fmt::Debug for PricingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PricingEngine").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemoryPremissaRepository, InMemorySettingsStore, MockSettingsStore};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use sunops_common::{
        GlobalPricingConfig, NewPremissa, PowerTier, PricingError, RegionalTax, SunOpsError,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn engine_with(premissas: Vec<NewPremissa>) -> PricingEngine {
        let repo = InMemoryPremissaRepository::new();
        for premissa in premissas {
            repo.create(premissa).await.unwrap();
        }
        PricingEngine::new(Arc::new(repo), Arc::new(InMemorySettingsStore::default()))
    }

    fn tabela_2025() -> NewPremissa {
        NewPremissa::new("Tabela 2025", date(2025, 1, 1), date(2025, 12, 31))
            .with_tier(PowerTier::new("Até 5 kW", dec!(0), dec!(5), dec!(2.80)))
            .with_tier(PowerTier::new("5 a 10 kW", dec!(5), dec!(10), dec!(2.50)))
            .with_regional_tax(RegionalTax::new("SP", dec!(0.18)))
    }

    #[tokio::test]
    async fn test_reference_quote_with_defaults() {
        let engine = engine_with(vec![tabela_2025()]).await;
        let request = PriceCalculationRequest::new(dec!(5.5), "sp", date(2025, 3, 10));

        let result = engine.calculate(&request).await.unwrap();

        assert_eq!(result.premissa_name, "Tabela 2025");
        assert_eq!(result.tier_name, "5 a 10 kW");
        assert_eq!(result.unit_price_wp, dec!(2.50));
        assert_eq!(result.base_price, dec!(13750.00));
        assert_eq!(result.margin_value, dec!(2750.00));
        assert_eq!(result.commission_value, dec!(687.50));
        assert_eq!(result.subtotal_before_tax, dec!(17187.50));
        assert_eq!(result.tax_value, dec!(3093.75));
        assert_eq!(result.final_price, dec!(20281.25));
        assert_eq!(result.details["resolucao"], "automatica_por_data");
        assert_eq!(result.details["origem_margem"], "padrao");
        assert_eq!(result.details["origem_imposto"], "regiao");
    }

    #[tokio::test]
    async fn test_overrides_replace_defaults() {
        let engine = engine_with(vec![tabela_2025()]).await;
        let request = PriceCalculationRequest::new(dec!(2), "SP", date(2025, 3, 10))
            .with_margin(dec!(0.10))
            .with_commission(Decimal::ZERO)
            .with_tax(dec!(0.05));

        let result = engine.calculate(&request).await.unwrap();

        // 2.80 × 2 × 1000 = 5600
        assert_eq!(result.margin_rate, dec!(0.10));
        assert_eq!(result.margin_value, dec!(560));
        assert_eq!(result.commission_value, Decimal::ZERO);
        assert_eq!(result.tax_value, dec!(308));
        assert_eq!(result.final_price, dec!(6468));
        assert_eq!(result.details["origem_comissao"], "override");
        assert_eq!(result.details["origem_imposto"], "override");
    }

    #[tokio::test]
    async fn test_settings_store_is_read_for_defaults() {
        let repo = InMemoryPremissaRepository::new();
        repo.create(tabela_2025()).await.unwrap();

        let mut settings = MockSettingsStore::new();
        settings
            .expect_get_defaults()
            .times(1)
            .returning(|| Ok(GlobalPricingConfig::new(dec!(0.30), dec!(0.10))));

        let engine = PricingEngine::new(Arc::new(repo), Arc::new(settings));
        let request = PriceCalculationRequest::new(dec!(1), "SP", date(2025, 3, 10));
        let result = engine.calculate(&request).await.unwrap();

        assert_eq!(result.margin_rate, dec!(0.30));
        assert_eq!(result.commission_rate, dec!(0.10));
    }

    #[tokio::test]
    async fn test_unknown_region_returns_no_result() {
        let engine = engine_with(vec![tabela_2025()]).await;
        let request = PriceCalculationRequest::new(dec!(3), "AM", date(2025, 3, 10));

        let err = engine.calculate(&request).await.unwrap_err();
        assert!(matches!(
            err,
            SunOpsError::Pricing(PricingError::UnknownRegion(ref r)) if r == "AM"
        ));
    }

    #[tokio::test]
    async fn test_validation_runs_before_lookup() {
        let mut settings = MockSettingsStore::new();
        settings.expect_get_defaults().never();
        let engine = PricingEngine::new(
            Arc::new(InMemoryPremissaRepository::new()),
            Arc::new(settings),
        );

        let request = PriceCalculationRequest::new(dec!(-1), "SP", date(2025, 3, 10));
        let err = engine.calculate(&request).await.unwrap_err();
        assert!(matches!(err, SunOpsError::Pricing(PricingError::Validation(_))));
    }

    #[tokio::test]
    async fn test_open_top_tier_flagged_in_details() {
        let engine = engine_with(vec![tabela_2025()]).await;
        let request = PriceCalculationRequest::new(dec!(40), "SP", date(2025, 3, 10));

        let result = engine.calculate(&request).await.unwrap();
        assert_eq!(result.tier_name, "5 a 10 kW");
        assert_eq!(result.details["faixa_topo_aberta"], true);
    }
}
