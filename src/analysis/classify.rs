//! Three-way priority classification (Crítico / Relevante / No Relevante)
//!
//! The raw score combines impact, urgency and keyword evidence, scaled by a
//! per-sector multiplier and by the scope the text claims:
//!
//! ```text
//! raw = (impact * 0.5 + urgency * 0.3 + (critical - non_relevant) * 0.5)
//!       * sector_multiplier * scale_multiplier
//! ```
//!
//! Impact and urgency are parameters regardless of where they came from; the
//! orchestrator decides whether they are caller-supplied, model-supplied or
//! derived from the text.

use super::tables::{
    self, ADVANCED_TECH_TERMS, CRITICAL_TERMS, EXISTING_TECH_TERMS, IMPOSSIBLE_TERMS,
    NON_RELEVANT_TERMS, RELEVANT_TERMS, SCALE_TIERS,
};
use super::text::{any_hit, count_hits, fold};
use super::types::{
    Classification, ClassificationLabel, ImpactLevel, Observation, Sector, UrgencyLevel,
};

const CRITICAL_THRESHOLD: f64 = 8.0;
const RELEVANT_THRESHOLD: f64 = 4.0;

/// How hard the problem is to solve with today's means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feasibility {
    ShortTerm,
    MediumTerm,
    Complex,
    Impossible,
}

impl Feasibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feasibility::ShortTerm => "Soluble a corto plazo",
            Feasibility::MediumTerm => "Soluble a medio plazo",
            Feasibility::Complex => "Complejo de resolver",
            Feasibility::Impossible => "Imposible de resolver actualmente",
        }
    }
}

pub fn impact_score(impact: ImpactLevel) -> f64 {
    match impact {
        ImpactLevel::Bajo => 3.0,
        ImpactLevel::Medio => 6.0,
        ImpactLevel::Alto => 8.0,
        ImpactLevel::MuyAlto => 10.0,
    }
}

pub fn urgency_score(urgency: UrgencyLevel) -> f64 {
    match urgency {
        UrgencyLevel::Baja => 1.0,
        UrgencyLevel::Media => 3.0,
        UrgencyLevel::Alta => 4.0,
        UrgencyLevel::Critica => 5.0,
    }
}

/// Scope multiplier from the widest scope word found in folded text.
pub fn scale_multiplier(folded: &str) -> f64 {
    SCALE_TIERS
        .iter()
        .find(|(words, _)| any_hit(folded, words))
        .map(|(_, multiplier)| *multiplier)
        .unwrap_or(1.0)
}

/// Feasibility from phrasing first, then from sector and description length.
///
/// The most specific phrasing wins: impossible, then advanced tech, then existing tech.
pub fn feasibility(folded: &str, sector: Sector, description_chars: usize) -> Feasibility {
    if any_hit(folded, IMPOSSIBLE_TERMS) {
        return Feasibility::Impossible;
    }
    if any_hit(folded, ADVANCED_TECH_TERMS) {
        return Feasibility::Complex;
    }
    if any_hit(folded, EXISTING_TECH_TERMS) {
        return Feasibility::ShortTerm;
    }

    let detailed = description_chars > 300;
    match sector {
        Sector::Tecnologia
        | Sector::Comercio
        | Sector::Entretenimiento
        | Sector::Turismo
        | Sector::Educacion => {
            if detailed {
                Feasibility::MediumTerm
            } else {
                Feasibility::ShortTerm
            }
        }
        Sector::Salud | Sector::Energia | Sector::MedioAmbiente => {
            if detailed {
                Feasibility::Complex
            } else {
                Feasibility::MediumTerm
            }
        }
        _ => Feasibility::MediumTerm,
    }
}

/// Which sub-signal carried the classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dominant {
    Impact,
    Urgency,
    Keywords,
}

/// Keyword evidence gathered from one text.
#[derive(Debug, Clone, Copy)]
struct KeywordCounts {
    critical: usize,
    relevant: usize,
    non_relevant: usize,
}

/// Pure classification engine. Holds no state; identical inputs always yield
/// identical output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassificationEngine;

impl ClassificationEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(
        &self,
        title: &str,
        description: &str,
        impact: ImpactLevel,
        urgency: UrgencyLevel,
        sector: Sector,
        subcategory: Option<&str>,
    ) -> Classification {
        let folded = fold(&format!("{} {}", title, description));
        let counts = KeywordCounts {
            critical: count_hits(&folded, CRITICAL_TERMS),
            relevant: count_hits(&folded, RELEVANT_TERMS),
            non_relevant: count_hits(&folded, NON_RELEVANT_TERMS),
        };

        let sector_multiplier = tables::profile(sector).classification_multiplier;
        let scale = scale_multiplier(&folded);
        let keyword_balance = counts.critical as f64 - counts.non_relevant as f64;

        let raw = (impact_score(impact) * 0.5 + urgency_score(urgency) * 0.3 + keyword_balance * 0.5)
            * sector_multiplier
            * scale;
        let score = (raw.max(0.0) * 10.0).round() / 10.0;

        let label = if score >= CRITICAL_THRESHOLD {
            ClassificationLabel::Critico
        } else if score >= RELEVANT_THRESHOLD {
            ClassificationLabel::Relevante
        } else {
            ClassificationLabel::NoRelevante
        };

        let dominant = dominant_signal(impact, urgency, keyword_balance);
        let justification =
            justification(label, dominant, impact, urgency, sector, counts, scale, subcategory);

        Classification {
            label,
            score,
            justification,
            feasibility: feasibility(&folded, sector, description.chars().count())
                .as_str()
                .to_string(),
        }
    }

    /// Classify an observation with already-resolved impact and urgency.
    pub fn classify_observation(
        &self,
        observation: &Observation,
        impact: ImpactLevel,
        urgency: UrgencyLevel,
    ) -> Classification {
        self.classify(
            &observation.title,
            &observation.description,
            impact,
            urgency,
            observation.sector,
            observation.subcategory.as_deref(),
        )
    }
}

/// Compare each sub-signal as a share of its own maximum.
fn dominant_signal(impact: ImpactLevel, urgency: UrgencyLevel, keyword_balance: f64) -> Dominant {
    let impact_share = impact_score(impact) / 10.0;
    let urgency_share = urgency_score(urgency) / 5.0;
    let keyword_share = (keyword_balance.abs() / 3.0).min(1.0);

    if keyword_balance != 0.0 && keyword_share >= impact_share && keyword_share >= urgency_share {
        Dominant::Keywords
    } else if urgency_share > impact_share {
        Dominant::Urgency
    } else {
        Dominant::Impact
    }
}

#[allow(clippy::too_many_arguments)]
fn justification(
    label: ClassificationLabel,
    dominant: Dominant,
    impact: ImpactLevel,
    urgency: UrgencyLevel,
    sector: Sector,
    counts: KeywordCounts,
    scale: f64,
    subcategory: Option<&str>,
) -> String {
    let impact = impact.as_str().to_lowercase();
    let urgency = urgency.as_str().to_lowercase();

    let mut text = match (label, dominant) {
        (ClassificationLabel::Critico, Dominant::Impact) => format!(
            "Problema crítico: un impacto {} en el sector {} exige una respuesta prioritaria.",
            impact, sector
        ),
        (ClassificationLabel::Critico, Dominant::Urgency) => format!(
            "Problema crítico: la urgencia {} obliga a actuar de inmediato.",
            urgency
        ),
        (ClassificationLabel::Critico, Dominant::Keywords) => format!(
            "Problema crítico: la descripción reúne {} señales de criticidad como emergencias o riesgos graves.",
            counts.critical
        ),
        (ClassificationLabel::Relevante, Dominant::Impact) => format!(
            "Problema relevante: su impacto {} justifica desarrollar una solución en el sector {}.",
            impact, sector
        ),
        (ClassificationLabel::Relevante, Dominant::Urgency) => format!(
            "Problema relevante: la urgencia {} abre una ventana de oportunidad a medio plazo.",
            urgency
        ),
        (ClassificationLabel::Relevante, Dominant::Keywords) => format!(
            "Problema relevante: se detectan {} indicadores de criticidad que conviene atender.",
            counts.critical
        ),
        (ClassificationLabel::NoRelevante, Dominant::Impact) => format!(
            "Problema de baja prioridad: un impacto {} resulta limitado para el sector {}.",
            impact, sector
        ),
        (ClassificationLabel::NoRelevante, Dominant::Urgency) => format!(
            "Problema de baja prioridad: la urgencia {} permite posponer su atención.",
            urgency
        ),
        (ClassificationLabel::NoRelevante, Dominant::Keywords) => format!(
            "Problema de baja prioridad: la propia descripción lo presenta como menor ({} indicadores).",
            counts.non_relevant
        ),
    };

    if counts.relevant >= 2 {
        text.push_str(&format!(
            " Incluye {} términos que refuerzan su relevancia.",
            counts.relevant
        ));
    }

    if scale >= 1.3 {
        text.push_str(" Su alcance nacional o global amplifica la importancia del problema.");
    } else if scale <= 0.8 {
        text.push_str(" Su alcance local limita el impacto potencial.");
    }

    if let Some(sub) = subcategory.map(str::trim).filter(|s| !s.is_empty()) {
        text.push_str(&format!(" Subcategoría: {}.", sub));
    }

    text
}
