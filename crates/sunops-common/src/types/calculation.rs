//! Price Calculation Types
//!
//! Request and result of the premissa-based pricing pipeline:
//!
//! ```text
//! base       = unit_price_wp × power_kw × 1000
//! costs      = base + additional_costs
//! before_tax = costs + costs × margin + costs × commission
//! final      = before_tax + before_tax × tax
//! ```

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PricingError;

/// Request for a price calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceCalculationRequest {
    /// Installed power (kW), must be positive
    #[serde(rename = "potencia_kw")]
    pub power_kw: Decimal,

    /// Region code, matched case-insensitively against the premissa taxes
    #[serde(rename = "regiao")]
    pub region: String,

    /// Date used to pick a vigent premissa
    #[serde(rename = "data")]
    pub as_of_date: NaiveDate,

    /// Explicit premissa, bypasses vigency matching
    #[serde(default)]
    pub premissa_id: Option<i64>,

    /// Extra costs added before margin (currency)
    #[serde(rename = "custos_adicionais", default)]
    pub additional_costs: Decimal,

    #[serde(rename = "margem_lucro_override", default)]
    pub margin_override: Option<Decimal>,

    #[serde(rename = "comissao_override", default)]
    pub commission_override: Option<Decimal>,

    #[serde(rename = "imposto_override", default)]
    pub tax_override: Option<Decimal>,
}

impl PriceCalculationRequest {
    /// Create a request with no overrides and no additional costs
    pub fn new(power_kw: Decimal, region: impl Into<String>, as_of_date: NaiveDate) -> Self {
        Self {
            power_kw,
            region: region.into(),
            as_of_date,
            premissa_id: None,
            additional_costs: Decimal::ZERO,
            margin_override: None,
            commission_override: None,
            tax_override: None,
        }
    }

    pub fn with_premissa(mut self, premissa_id: i64) -> Self {
        self.premissa_id = Some(premissa_id);
        self
    }

    pub fn with_additional_costs(mut self, costs: Decimal) -> Self {
        self.additional_costs = costs;
        self
    }

    pub fn with_margin(mut self, margin: Decimal) -> Self {
        self.margin_override = Some(margin);
        self
    }

    pub fn with_commission(mut self, commission: Decimal) -> Self {
        self.commission_override = Some(commission);
        self
    }

    pub fn with_tax(mut self, tax: Decimal) -> Self {
        self.tax_override = Some(tax);
        self
    }

    /// Reject malformed requests before any lookup happens
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.power_kw <= Decimal::ZERO {
            return Err(PricingError::Validation(format!(
                "potencia_kw deve ser maior que zero (recebido {})",
                self.power_kw
            )));
        }
        if self.region.trim().is_empty() {
            return Err(PricingError::Validation("regiao é obrigatória".to_string()));
        }
        if self.additional_costs < Decimal::ZERO {
            return Err(PricingError::Validation(format!(
                "custos_adicionais não pode ser negativo (recebido {})",
                self.additional_costs
            )));
        }

        let overrides = [
            ("margem_lucro_override", self.margin_override),
            ("comissao_override", self.commission_override),
            ("imposto_override", self.tax_override),
        ];
        for (field, value) in overrides {
            if let Some(rate) = value {
                if rate < Decimal::ZERO || rate > Decimal::ONE {
                    return Err(PricingError::Validation(format!(
                        "{field} deve ser uma fração entre 0 e 1 (recebido {rate})"
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Fully itemized price, immutable once produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceCalculationResult {
    #[serde(rename = "potencia_solicitada_kw")]
    pub power_kw: Decimal,

    #[serde(rename = "regiao")]
    pub region: String,

    #[serde(rename = "data_calculo")]
    pub calculation_date: NaiveDate,

    #[serde(rename = "premissa_usada_id")]
    pub premissa_id: i64,

    #[serde(rename = "premissa_usada_nome")]
    pub premissa_name: String,

    #[serde(rename = "faixa_aplicada_nome")]
    pub tier_name: String,

    #[serde(rename = "preco_unitario_wp")]
    pub unit_price_wp: Decimal,

    #[serde(rename = "preco_base")]
    pub base_price: Decimal,

    #[serde(rename = "custos_adicionais")]
    pub additional_costs: Decimal,

    #[serde(rename = "subtotal_custos")]
    pub cost_subtotal: Decimal,

    #[serde(rename = "margem_lucro_percentual")]
    pub margin_rate: Decimal,

    #[serde(rename = "margem_lucro_valor")]
    pub margin_value: Decimal,

    #[serde(rename = "comissao_percentual")]
    pub commission_rate: Decimal,

    #[serde(rename = "comissao_valor")]
    pub commission_value: Decimal,

    #[serde(rename = "subtotal_sem_imposto")]
    pub subtotal_before_tax: Decimal,

    #[serde(rename = "imposto_percentual")]
    pub tax_rate: Decimal,

    #[serde(rename = "imposto_valor")]
    pub tax_value: Decimal,

    #[serde(rename = "preco_final")]
    pub final_price: Decimal,

    /// Derivation metadata; ordered so identical inputs serialize identically
    #[serde(rename = "detalhes", default)]
    pub details: BTreeMap<String, serde_json::Value>,
}

/// How the premissa behind a result was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionPath {
    /// Requested by id, vigency ignored
    Explicita,
    /// Picked among active premissas covering the date
    AutomaticaPorData,
}

impl ResolutionPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionPath::Explicita => "explicita",
            ResolutionPath::AutomaticaPorData => "automatica_por_data",
        }
    }
}

/// Where a rate used in the derivation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    Override,
    Padrao,
    Regiao,
}

impl RateSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateSource::Override => "override",
            RateSource::Padrao => "padrao",
            RateSource::Regiao => "regiao",
        }
    }
}
