//! Power tier selection
//!
//! Tiers are half-open `[min, max)` ranges checked in ascending order of
//! `min`. The top tier has no ceiling: power at or above its stated maximum
//! still lands in it.

use rust_decimal::Decimal;
use sunops_common::{Premissa, PricingError};

/// Tier chosen for a power rating
#[derive(Debug, Clone, PartialEq)]
pub struct TierMatch {
    pub name: String,
    pub unit_price: Decimal,
    pub min_kw: Decimal,
    pub max_kw: Decimal,
    /// Matched through the open-ended top tier at or above its stated max
    pub open_top: bool,
}

/// Find the tier containing `power_kw`
pub fn select_tier(premissa: &Premissa, power_kw: Decimal) -> Result<TierMatch, PricingError> {
    let tiers = premissa.tiers_ascending();
    let Some(lowest) = tiers.first() else {
        return Err(PricingError::PowerOutsideTiers { power: power_kw });
    };

    if power_kw < lowest.min_kw {
        return Err(PricingError::PowerBelowRange {
            power: power_kw,
            minimum: lowest.min_kw,
        });
    }

    let top = tiers.len() - 1;
    for (idx, tier) in tiers.iter().enumerate() {
        if power_kw < tier.min_kw {
            continue;
        }
        let is_top = idx == top;
        if power_kw < tier.max_kw || is_top {
            return Ok(TierMatch {
                name: tier.name.clone(),
                unit_price: tier.unit_price,
                min_kw: tier.min_kw,
                max_kw: tier.max_kw,
                open_top: is_top && power_kw >= tier.max_kw,
            });
        }
    }

    Err(PricingError::PowerOutsideTiers { power: power_kw })
}
