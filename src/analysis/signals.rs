//! Impact and urgency derivation for observations that arrive without them

use super::classify::scale_multiplier;
use super::tables::{self, CRITICAL_TERMS, RELEVANT_TERMS, URGENCY_TERMS};
use super::text::{count_hits, fold};
use super::types::{ImpactLevel, Observation, UrgencyLevel};

/// Estimate impact and urgency from the observation's text and sector.
///
/// Ignores any caller-supplied values; see [`resolve_signals`] for the
/// precedence-aware variant.
pub fn derive_signals(observation: &Observation) -> (ImpactLevel, UrgencyLevel) {
    let folded = fold(&observation.full_text());
    let critical = count_hits(&folded, CRITICAL_TERMS);
    let relevant = count_hits(&folded, RELEVANT_TERMS);
    let urgent = count_hits(&folded, URGENCY_TERMS);
    let scale = scale_multiplier(&folded);

    let impact = if scale >= 1.5 || critical >= 3 {
        ImpactLevel::MuyAlto
    } else if scale >= 1.3 || critical >= 2 {
        ImpactLevel::Alto
    } else if critical >= 1 || relevant >= 1 {
        ImpactLevel::Medio
    } else {
        ImpactLevel::Bajo
    };

    let urgency = match urgent {
        n if n >= 2 => UrgencyLevel::Critica,
        1 => UrgencyLevel::Alta,
        _ if tables::profile(observation.sector).trend.trend == "Alto crecimiento" => {
            UrgencyLevel::Media
        }
        _ => UrgencyLevel::Baja,
    };

    (impact, urgency)
}

/// Caller-supplied impact and urgency, with derived values filling the gaps.
pub fn resolve_signals(observation: &Observation) -> (ImpactLevel, UrgencyLevel) {
    match (observation.impact, observation.urgency) {
        (Some(impact), Some(urgency)) => (impact, urgency),
        (impact, urgency) => {
            let (derived_impact, derived_urgency) = derive_signals(observation);
            (
                impact.unwrap_or(derived_impact),
                urgency.unwrap_or(derived_urgency),
            )
        }
    }
}
