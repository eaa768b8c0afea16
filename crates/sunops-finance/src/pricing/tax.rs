//! Regional tax resolution

use rust_decimal::Decimal;
use sunops_common::{Premissa, PricingError, RateSource};

/// Tax rate to apply and where it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxResolution {
    pub rate: Decimal,
    pub source: RateSource,
}

/// An override short-circuits the lookup, so an unknown region is fine then
pub fn resolve_tax(
    premissa: &Premissa,
    region: &str,
    tax_override: Option<Decimal>,
) -> Result<TaxResolution, PricingError> {
    if let Some(rate) = tax_override {
        return Ok(TaxResolution {
            rate,
            source: RateSource::Override,
        });
    }

    premissa
        .tax_for(region)
        .map(|tax| TaxResolution {
            rate: tax.tax_rate,
            source: RateSource::Regiao,
        })
        .ok_or_else(|| PricingError::UnknownRegion(region.trim().to_string()))
}
