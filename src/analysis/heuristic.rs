//! Local heuristic scorer: the network-free analysis strategy
//!
//! Scoring runs in a fixed order:
//! 1. Base score plus sector weight
//! 2. Keyword bonuses (innovation, problem definition, market demand)
//! 3. Length and tag bonuses
//! 4. Clamp to [65, 98], then scale by sector market potential into [35, 98]
//!
//! Every bonus that fires is recorded as a human-readable factor.

use super::signals::resolve_signals;
use super::tables::{self, INNOVATION_TERMS, MARKET_TERMS, PROBLEM_TERMS};
use super::text::{count_hits, fold};
use super::types::{LocalScore, MarketSize, Observation};

const BASE_SCORE: i32 = 75;
const MIN_HEURISTIC_SCORE: i32 = 65;
const MAX_HEURISTIC_SCORE: i32 = 98;

/// Deterministic scorer. Identical observations always produce identical scores.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalHeuristicScorer;

impl LocalHeuristicScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score_locally(&self, observation: &Observation) -> LocalScore {
        let profile = tables::profile(observation.sector);
        let folded = fold(&observation.full_text());
        let mut factors = Vec::new();

        let mut score = BASE_SCORE + profile.weight;
        if profile.weight > 0 {
            factors.push(format!(
                "Sector {} con buena proyección (+{}), competencia {}",
                observation.sector,
                profile.weight,
                profile.competition.to_lowercase()
            ));
        }

        let innovation = count_hits(&folded, INNOVATION_TERMS);
        if innovation > 0 {
            let bonus = (innovation as i32 * 2).min(10);
            score += bonus;
            factors.push(format!(
                "Componente innovador: {} términos de innovación (+{})",
                innovation, bonus
            ));
        }

        let problem = count_hits(&folded, PROBLEM_TERMS);
        let problem_bonus = match problem {
            n if n > 2 => 5,
            n if n > 0 => 2,
            _ => 0,
        };
        if problem_bonus > 0 {
            score += problem_bonus;
            factors.push(format!(
                "Problema bien definido: {} indicadores (+{})",
                problem, problem_bonus
            ));
        }

        let market = count_hits(&folded, MARKET_TERMS);
        if market > 0 {
            let bonus = (market as i32).min(3);
            score += bonus;
            factors.push(format!(
                "Referencias explícitas al mercado: {} (+{})",
                market, bonus
            ));
        }

        let description_chars = observation.description.chars().count();
        let description_bonus = match description_chars {
            n if n > 300 => 5,
            n if n > 200 => 3,
            n if n < 100 => -3,
            _ => 0,
        };
        score += description_bonus;
        if description_bonus > 0 {
            factors.push(format!(
                "Descripción detallada de {} caracteres (+{})",
                description_chars, description_bonus
            ));
        } else if description_bonus < 0 {
            factors.push(format!(
                "Descripción breve de {} caracteres, conviene ampliarla ({})",
                description_chars, description_bonus
            ));
        }

        if observation.title.chars().count() > 50 {
            score += 3;
            factors.push("Título descriptivo y específico (+3)".to_string());
        }

        let tag_bonus = match observation.tags.len() {
            n if n >= 4 => 4,
            3 => 2,
            _ => 0,
        };
        if tag_bonus > 0 {
            score += tag_bonus;
            factors.push(format!(
                "Bien categorizada con {} etiquetas (+{})",
                observation.tags.len(),
                tag_bonus
            ));
        }

        let clamped = score.clamp(MIN_HEURISTIC_SCORE, MAX_HEURISTIC_SCORE);
        let potential_score = tables::market_adjusted_score(clamped as f64, observation.sector);
        factors.push(format!(
            "Mercado con crecimiento del {:.1}% anual y saturación del {:.0}%",
            profile.market.growth_pct,
            profile.market.saturation * 100.0
        ));

        let (impact, _) = resolve_signals(observation);

        LocalScore {
            potential_score,
            market_size: MarketSize::from_score(potential_score),
            competition: profile.competition.to_string(),
            recommendation: recommendation(potential_score).to_string(),
            factors,
            market_analysis: tables::market_analysis(observation.sector),
            urgency_analysis: tables::urgency_analysis(observation.sector, impact),
            competitors: tables::top_competitors(observation.sector),
        }
    }
}

fn recommendation(score: u8) -> &'static str {
    match score {
        s if s > 90 => {
            "Oportunidad excepcional: avanzar de inmediato con un MVP y buscar inversión temprana."
        }
        s if s > 85 => {
            "Oportunidad muy prometedora: validar con clientes potenciales y preparar el lanzamiento."
        }
        s if s > 80 => {
            "Buena oportunidad: realizar un estudio de mercado detallado antes de invertir."
        }
        s if s > 75 => {
            "Oportunidad moderada: refinar la propuesta de valor y diferenciarse de la competencia."
        }
        _ => "Oportunidad limitada: replantear el enfoque o explorar nichos más específicos.",
    }
}
