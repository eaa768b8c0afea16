//! Global pricing configuration (singleton)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::SunOpsError;
use crate::{DEFAULT_COMMISSION_RATE, DEFAULT_MARGIN_RATE};

/// Fallback margin and commission rates for price calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalPricingConfig {
    /// Fraction, 0.20 for 20%
    #[serde(rename = "margem_lucro_padrao")]
    pub default_margin: Decimal,

    /// Fraction, 0.05 for 5%
    #[serde(rename = "percentual_comissao_padrao")]
    pub default_commission: Decimal,
}

impl Default for GlobalPricingConfig {
    fn default() -> Self {
        Self {
            default_margin: DEFAULT_MARGIN_RATE,
            default_commission: DEFAULT_COMMISSION_RATE,
        }
    }
}

impl GlobalPricingConfig {
    pub fn new(default_margin: Decimal, default_commission: Decimal) -> Self {
        Self {
            default_margin,
            default_commission,
        }
    }

    /// Both rates must be fractions in [0, 1]
    pub fn validate(&self) -> Result<(), SunOpsError> {
        check_fraction("margem_lucro_padrao", self.default_margin)?;
        check_fraction("percentual_comissao_padrao", self.default_commission)
    }
}

fn check_fraction(field: &str, value: Decimal) -> Result<(), SunOpsError> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(SunOpsError::Validation(format!(
            "{field} deve estar entre 0 e 1 (recebido {value})"
        )));
    }
    Ok(())
}

/// Wire shape of the singleton, always reported with id 1
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowGlobalPricingConfig {
    pub id: i64,
    #[serde(flatten)]
    pub config: GlobalPricingConfig,
}

impl From<GlobalPricingConfig> for ShowGlobalPricingConfig {
    fn from(config: GlobalPricingConfig) -> Self {
        Self { id: 1, config }
    }
}
