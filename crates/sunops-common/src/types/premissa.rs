//! Premissa Types - time-boxed pricing assumption sets
//!
//! A premissa bundles the per-Wp unit prices of each power tier ("faixa")
//! with the tax rate of each region it covers. The pricing engine reads
//! premissas; only the administrative path creates or edits them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PremissaError;

/// Power-range bucket with its own per-watt unit price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerTier {
    /// Assigned by the repository
    #[serde(default)]
    pub id: i64,

    #[serde(rename = "nome_faixa")]
    pub name: String,

    /// Inclusive lower bound (kW)
    #[serde(rename = "potencia_min")]
    pub min_kw: Decimal,

    /// Exclusive upper bound (kW), ignored for the top tier
    #[serde(rename = "potencia_max")]
    pub max_kw: Decimal,

    /// Currency per watt-peak
    #[serde(rename = "preco_unitario")]
    pub unit_price: Decimal,
}

impl PowerTier {
    pub fn new(name: impl Into<String>, min_kw: Decimal, max_kw: Decimal, unit_price: Decimal) -> Self {
        Self {
            id: 0,
            name: name.into(),
            min_kw,
            max_kw,
            unit_price,
        }
    }
}

/// Tax rate applied to sales in one region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalTax {
    #[serde(default)]
    pub id: i64,

    /// Free-form short code (e.g. "SP"), matched case-insensitively
    #[serde(rename = "regiao")]
    pub region: String,

    /// Fraction, 0.18 for 18%
    #[serde(rename = "aliquota_imposto")]
    pub tax_rate: Decimal,
}

impl RegionalTax {
    pub fn new(region: impl Into<String>, tax_rate: Decimal) -> Self {
        Self {
            id: 0,
            region: region.into(),
            tax_rate,
        }
    }

    /// Whether this entry covers `region` (trimmed, case-insensitive)
    pub fn matches(&self, region: &str) -> bool {
        normalize_region(&self.region) == normalize_region(region)
    }
}

/// Canonical form used for region comparisons
pub fn normalize_region(region: &str) -> String {
    region.trim().to_uppercase()
}

/// Stored pricing assumption set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Premissa {
    pub id: i64,

    #[serde(rename = "nome")]
    pub name: String,

    #[serde(rename = "descricao", default)]
    pub description: Option<String>,

    /// Inclusive
    #[serde(rename = "data_vigencia_inicio")]
    pub valid_from: NaiveDate,

    /// Inclusive
    #[serde(rename = "data_vigencia_fim")]
    pub valid_until: NaiveDate,

    #[serde(rename = "ativa")]
    pub active: bool,

    #[serde(rename = "faixas")]
    pub tiers: Vec<PowerTier>,

    #[serde(rename = "regioes", default)]
    pub regional_taxes: Vec<RegionalTax>,
}

impl Premissa {
    /// Build a stored premissa from admin input
    pub fn from_new(id: i64, new: NewPremissa) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            valid_from: new.valid_from,
            valid_until: new.valid_until,
            active: new.active,
            tiers: new.tiers,
            regional_taxes: new.regional_taxes,
        }
    }

    /// Whether `date` falls inside the validity window
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.valid_from <= date && date <= self.valid_until
    }

    /// Eligible for automatic selection on `date`
    pub fn is_vigent(&self, date: NaiveDate) -> bool {
        self.active && self.covers(date)
    }

    /// Tiers in ascending order of minimum power
    pub fn tiers_ascending(&self) -> Vec<&PowerTier> {
        let mut tiers: Vec<&PowerTier> = self.tiers.iter().collect();
        tiers.sort_by(|a, b| a.min_kw.cmp(&b.min_kw));
        tiers
    }

    /// Tax entry for `region`, if any
    pub fn tax_for(&self, region: &str) -> Option<&RegionalTax> {
        self.regional_taxes.iter().find(|t| t.matches(region))
    }
}

/// Admin input for creating or replacing a premissa
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPremissa {
    #[serde(rename = "nome")]
    pub name: String,

    #[serde(rename = "descricao", default)]
    pub description: Option<String>,

    #[serde(rename = "data_vigencia_inicio")]
    pub valid_from: NaiveDate,

    #[serde(rename = "data_vigencia_fim")]
    pub valid_until: NaiveDate,

    #[serde(rename = "ativa", default = "default_active")]
    pub active: bool,

    #[serde(rename = "faixas")]
    pub tiers: Vec<PowerTier>,

    #[serde(rename = "regioes", default)]
    pub regional_taxes: Vec<RegionalTax>,
}

fn default_active() -> bool {
    true
}

impl NewPremissa {
    pub fn new(name: impl Into<String>, valid_from: NaiveDate, valid_until: NaiveDate) -> Self {
        Self {
            name: name.into(),
            description: None,
            valid_from,
            valid_until,
            active: true,
            tiers: Vec::new(),
            regional_taxes: Vec::new(),
        }
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_tier(mut self, tier: PowerTier) -> Self {
        self.tiers.push(tier);
        self
    }

    pub fn with_regional_tax(mut self, tax: RegionalTax) -> Self {
        self.regional_taxes.push(tax);
        self
    }

    /// Check the structural invariants of a premissa
    pub fn validate(&self) -> Result<(), PremissaError> {
        if self.name.trim().is_empty() {
            return Err(invalid("nome é obrigatório"));
        }
        if self.valid_from > self.valid_until {
            return Err(invalid(format!(
                "início da vigência ({}) posterior ao fim ({})",
                self.valid_from, self.valid_until
            )));
        }
        if self.tiers.is_empty() {
            return Err(invalid("ao menos uma faixa de potência é obrigatória"));
        }

        for tier in &self.tiers {
            if tier.name.trim().is_empty() {
                return Err(invalid("toda faixa precisa de um nome"));
            }
            if tier.min_kw < Decimal::ZERO {
                return Err(invalid(format!(
                    "faixa '{}' com potência mínima negativa",
                    tier.name
                )));
            }
            if tier.min_kw >= tier.max_kw {
                return Err(invalid(format!(
                    "faixa '{}': potência mínima deve ser menor que a máxima",
                    tier.name
                )));
            }
            if tier.unit_price <= Decimal::ZERO {
                return Err(invalid(format!(
                    "faixa '{}': preço unitário deve ser positivo",
                    tier.name
                )));
            }
        }

        let mut sorted: Vec<&PowerTier> = self.tiers.iter().collect();
        sorted.sort_by(|a, b| a.min_kw.cmp(&b.min_kw));
        for pair in sorted.windows(2) {
            let (lower, upper) = (pair[0], pair[1]);
            if lower.max_kw > upper.min_kw {
                return Err(invalid(format!(
                    "faixas '{}' e '{}' se sobrepõem",
                    lower.name, upper.name
                )));
            }
        }

        let mut seen: Vec<String> = Vec::with_capacity(self.regional_taxes.len());
        for tax in &self.regional_taxes {
            let code = normalize_region(&tax.region);
            if code.is_empty() {
                return Err(invalid("código de região vazio"));
            }
            if tax.tax_rate < Decimal::ZERO || tax.tax_rate > Decimal::ONE {
                return Err(invalid(format!(
                    "alíquota da região {} fora do intervalo [0, 1]",
                    code
                )));
            }
            if seen.contains(&code) {
                return Err(invalid(format!("região {} duplicada", code)));
            }
            seen.push(code);
        }

        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> PremissaError {
    PremissaError::Invalid(msg.into())
}
