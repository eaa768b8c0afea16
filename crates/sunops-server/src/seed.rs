//! Startup seed data
//!
//! ```json
//! {
//!   "configuracoes": { "margem_lucro_padrao": "0.20", "percentual_comissao_padrao": "0.05" },
//!   "premissas": [ { "nome": "Tabela 2025", "data_vigencia_inicio": "2025-01-01", ... } ]
//! }
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use sunops_common::{GlobalPricingConfig, NewPremissa};
use sunops_finance::{Finance, PremissaRepository, SettingsStore};
use tracing::info;

#[derive(Debug, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub configuracoes: Option<GlobalPricingConfig>,
    #[serde(default)]
    pub premissas: Vec<NewPremissa>,
}

/// Load a seed file and apply it
pub async fn seed_from_file(finance: &Finance, path: &Path) -> Result<()> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading seed file {}", path.display()))?;
    let data: SeedData = serde_json::from_str(&raw)
        .with_context(|| format!("parsing seed file {}", path.display()))?;
    apply(finance, data).await
}

/// Store every seeded premissa and replace the defaults if given
pub async fn apply(finance: &Finance, data: SeedData) -> Result<()> {
    if let Some(config) = data.configuracoes {
        finance.settings.update_defaults(config).await?;
    }

    let count = data.premissas.len();
    for premissa in data.premissas {
        let name = premissa.name.clone();
        finance
            .premissas
            .create(premissa)
            .await
            .with_context(|| format!("seeding premissa '{name}'"))?;
    }

    info!(premissas = count, "Seed data loaded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SEED: &str = r#"{
        "configuracoes": { "margem_lucro_padrao": 0.3, "percentual_comissao_padrao": "0.04" },
        "premissas": [{
            "nome": "Tabela 2025",
            "data_vigencia_inicio": "2025-01-01",
            "data_vigencia_fim": "2025-12-31",
            "faixas": [
                { "nome_faixa": "Até 5 kW", "potencia_min": 0, "potencia_max": 5, "preco_unitario": "2.80" }
            ],
            "regioes": [ { "regiao": "SP", "aliquota_imposto": "0.18" } ]
        }]
    }"#;

    #[tokio::test]
    async fn test_apply_seed() {
        let finance = Finance::in_memory(GlobalPricingConfig::default());
        let data: SeedData = serde_json::from_str(SEED).unwrap();
        apply(&finance, data).await.unwrap();

        let premissas = finance.premissas.list().await.unwrap();
        assert_eq!(premissas.len(), 1);
        assert!(premissas[0].active);

        let defaults = finance.settings.get_defaults().await.unwrap();
        assert_eq!(defaults.default_margin, dec!(0.3));
        assert_eq!(defaults.default_commission, dec!(0.04));
    }

    #[tokio::test]
    async fn test_invalid_premissa_aborts_seed() {
        let finance = Finance::in_memory(GlobalPricingConfig::default());
        let bad = SEED.replace("\"potencia_max\": 5", "\"potencia_max\": 0");
        let data: SeedData = serde_json::from_str(&bad).unwrap();

        let err = apply(&finance, data).await.unwrap_err();
        assert!(err.to_string().contains("Tabela 2025"));
    }
}
