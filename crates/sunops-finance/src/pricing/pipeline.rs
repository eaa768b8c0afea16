//! Price derivation pipeline
//!
//! ```text
//! base_price          = unit_price_wp × power_kw × 1000
//! cost_subtotal       = base_price + additional_costs
//! margin_value        = cost_subtotal × margin_rate
//! commission_value    = cost_subtotal × commission_rate
//! subtotal_before_tax = cost_subtotal + margin_value + commission_value
//! tax_value           = subtotal_before_tax × tax_rate
//! final_price         = subtotal_before_tax + tax_value
//! ```
//!
//! Margin and commission are both charged on the cost subtotal, never on
//! each other. No step rounds.

use rust_decimal::Decimal;
use sunops_common::{PricingError, WATTS_PER_KILOWATT};

/// Resolved inputs of one derivation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceInputs {
    pub unit_price_wp: Decimal,
    pub power_kw: Decimal,
    pub additional_costs: Decimal,
    pub margin_rate: Decimal,
    pub commission_rate: Decimal,
    pub tax_rate: Decimal,
}

/// Every intermediate figure of a derivation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBreakdown {
    pub base_price: Decimal,
    pub additional_costs: Decimal,
    pub cost_subtotal: Decimal,
    pub margin_rate: Decimal,
    pub margin_value: Decimal,
    pub commission_rate: Decimal,
    pub commission_value: Decimal,
    pub subtotal_before_tax: Decimal,
    pub tax_rate: Decimal,
    pub tax_value: Decimal,
    pub final_price: Decimal,
}

/// Run the derivation; any overflow aborts the whole calculation
pub fn derive_price(inputs: &PriceInputs) -> Result<PriceBreakdown, PricingError> {
    let base_price = mul(
        mul(inputs.unit_price_wp, inputs.power_kw)?,
        Decimal::from(WATTS_PER_KILOWATT),
    )?;
    let cost_subtotal = add(base_price, inputs.additional_costs)?;

    let margin_value = mul(cost_subtotal, inputs.margin_rate)?;
    let commission_value = mul(cost_subtotal, inputs.commission_rate)?;
    let subtotal_before_tax = add(add(cost_subtotal, margin_value)?, commission_value)?;

    let tax_value = mul(subtotal_before_tax, inputs.tax_rate)?;
    let final_price = add(subtotal_before_tax, tax_value)?;

    Ok(PriceBreakdown {
        base_price,
        additional_costs: inputs.additional_costs,
        cost_subtotal,
        margin_rate: inputs.margin_rate,
        margin_value,
        commission_rate: inputs.commission_rate,
        commission_value,
        subtotal_before_tax,
        tax_rate: inputs.tax_rate,
        tax_value,
        final_price,
    })
}

fn mul(a: Decimal, b: Decimal) -> Result<Decimal, PricingError> {
    a.checked_mul(b).ok_or(PricingError::Overflow)
}

fn add(a: Decimal, b: Decimal) -> Result<Decimal, PricingError> {
    a.checked_add(b).ok_or(PricingError::Overflow)
}
