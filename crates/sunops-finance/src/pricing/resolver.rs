//! Premissa resolution
//!
//! An explicit id always wins and ignores vigency. Otherwise the active
//! premissas covering the date compete; the latest `valid_from` wins and a
//! tie on start date goes to the lowest id.

use std::cmp::Ordering;

use chrono::NaiveDate;
use sunops_common::{Premissa, PricingError, ResolutionPath, Result};
use tracing::debug;

use crate::store::PremissaRepository;

/// Premissa chosen for one calculation
#[derive(Debug, Clone)]
pub struct ResolvedPremissa {
    pub premissa: Premissa,
    pub path: ResolutionPath,
    /// Vigent premissas considered (1 on the explicit path)
    pub candidates: usize,
}

/// Pick the premissa for a request
pub async fn resolve_premissa(
    repository: &dyn PremissaRepository,
    premissa_id: Option<i64>,
    as_of_date: NaiveDate,
) -> Result<ResolvedPremissa> {
    if let Some(id) = premissa_id {
        let premissa = repository
            .get_by_id(id)
            .await?
            .ok_or(PricingError::NotFound(id))?;
        debug!(premissa_id = id, active = premissa.active, "Using explicit premissa");
        return Ok(ResolvedPremissa {
            premissa,
            path: ResolutionPath::Explicita,
            candidates: 1,
        });
    }

    let candidates = repository.find_active_for_date(as_of_date).await?;
    let count = candidates.len();
    let premissa =
        select_vigent(candidates, as_of_date).ok_or(PricingError::NoApplicablePremissa(as_of_date))?;

    debug!(
        premissa_id = premissa.id,
        candidates = count,
        date = %as_of_date,
        "Resolved premissa by date"
    );
    Ok(ResolvedPremissa {
        premissa,
        path: ResolutionPath::AutomaticaPorData,
        candidates: count,
    })
}

/// Deterministic choice among vigent premissas
///
/// Entries that are not vigent on `date` are skipped, so the result does not
/// depend on how well the repository filtered.
pub fn select_vigent(candidates: Vec<Premissa>, date: NaiveDate) -> Option<Premissa> {
    candidates
        .into_iter()
        .filter(|p| p.is_vigent(date))
        .min_by(precedence)
}

/// `Less` means `a` takes precedence over `b`
fn precedence(a: &Premissa, b: &Premissa) -> Ordering {
    b.valid_from
        .cmp(&a.valid_from)
        .then_with(|| a.id.cmp(&b.id))
}
