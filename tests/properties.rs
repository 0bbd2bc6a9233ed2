//! Property sweeps over seeded random inputs
//!
//! Totality, determinism, range invariants, impact monotonicity, and the
//! sanitizer's round-trip and failure behavior.

use oppscore::analysis::{sanitize_value, LocalHeuristicScorer};
use oppscore::{
    AnalysisOrchestrator, ClassificationEngine, ImpactLevel, MarketSize, Observation, Sector,
    UrgencyLevel,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

const ITERATIONS: usize = 300;

const WORDS: &[&str] = &[
    "crítico", "emergencia", "menor", "pequeño", "mercado", "clientes", "innovador",
    "inteligencia artificial", "global", "millones", "local", "problema", "solución",
    "aplicación", "teletransportación", "urgente", "ñandú", "café", "🚀", "\t", "…",
    "日本", "datos", "plataforma", "", "crisis", "leve",
];

fn random_text(rng: &mut StdRng, max_words: usize) -> String {
    let n = rng.gen_range(1..=max_words);
    (0..n)
        .map(|_| *WORDS.choose(rng).unwrap_or(&"x"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn random_observation(rng: &mut StdRng) -> Observation {
    let sector = *Sector::ALL.choose(rng).unwrap_or(&Sector::Otro);
    let mut title = random_text(rng, 12);
    if title.trim().is_empty() {
        title.push('t');
    }
    let mut description = random_text(rng, 80);
    if description.trim().is_empty() {
        description.push('d');
    }
    let tag_count = rng.gen_range(0..6);
    let mut obs = Observation::new(title, description, sector)
        .with_tags((0..tag_count).map(|i| format!("tag{}", i)));
    if rng.gen_bool(0.5) {
        obs = obs.with_impact(*ImpactLevel::ALL.choose(rng).unwrap_or(&ImpactLevel::Medio));
    }
    if rng.gen_bool(0.5) {
        obs = obs.with_urgency(*UrgencyLevel::ALL.choose(rng).unwrap_or(&UrgencyLevel::Media));
    }
    obs
}

#[test]
fn local_analysis_is_total_and_in_range() {
    let mut rng = StdRng::seed_from_u64(42);
    let orchestrator = AnalysisOrchestrator::new();

    for _ in 0..ITERATIONS {
        let obs = random_observation(&mut rng);
        let result = orchestrator.analyze_local(&obs).unwrap();

        assert!(
            (35..=98).contains(&result.potential_score),
            "score {} out of range for {:?}",
            result.potential_score,
            obs
        );
        assert_eq!(result.market_size, MarketSize::from_score(result.potential_score));
        assert!(result.classification.score >= 0.0);
        assert!(!result.classification.justification.is_empty());
        assert!(!result.classification.feasibility.is_empty());
        assert!((0.0..=1.0).contains(&result.market_analysis.saturation_index));
        assert!(result.competitors.len() <= 3);
    }
}

#[test]
fn local_analysis_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(7);
    let scorer = LocalHeuristicScorer::new();
    let orchestrator = AnalysisOrchestrator::new();

    for _ in 0..ITERATIONS {
        let obs = random_observation(&mut rng);
        assert_eq!(scorer.score_locally(&obs), scorer.score_locally(&obs));

        let first = orchestrator.analyze_local(&obs).unwrap();
        let mut second = orchestrator.analyze_local(&obs).unwrap();
        second.timestamp = first.timestamp;
        assert_eq!(first, second);
    }
}

#[test]
fn classification_score_is_monotonic_in_impact() {
    let mut rng = StdRng::seed_from_u64(1234);
    let engine = ClassificationEngine::new();

    for _ in 0..ITERATIONS {
        let obs = random_observation(&mut rng);
        let urgency = *UrgencyLevel::ALL.choose(&mut rng).unwrap_or(&UrgencyLevel::Media);

        let scores: Vec<f64> = ImpactLevel::ALL
            .iter()
            .map(|impact| engine.classify_observation(&obs, *impact, urgency).score)
            .collect();

        for pair in scores.windows(2) {
            assert!(
                pair[0] <= pair[1],
                "impact raised but score fell: {:?} for {:?}",
                scores,
                obs
            );
        }
    }
}

#[test]
fn classification_score_is_monotonic_in_urgency() {
    let mut rng = StdRng::seed_from_u64(99);
    let engine = ClassificationEngine::new();

    for _ in 0..ITERATIONS {
        let obs = random_observation(&mut rng);
        let impact = *ImpactLevel::ALL.choose(&mut rng).unwrap_or(&ImpactLevel::Medio);

        let scores: Vec<f64> = UrgencyLevel::ALL
            .iter()
            .map(|urgency| engine.classify_observation(&obs, impact, *urgency).score)
            .collect();

        assert!(scores.windows(2).all(|p| p[0] <= p[1]), "{:?}", scores);
    }
}

// ---------------------------------------------------------------------------
// Sanitizer
// ---------------------------------------------------------------------------

const PROSE: &[&str] = &[
    "",
    "Claro, aquí está el análisis:",
    "Here is the JSON you asked for.\n",
    "Resultado:\n\n",
    "Nota: los valores son estimaciones.",
    "¡Listo!",
];

fn random_payload(rng: &mut StdRng) -> Value {
    let score: u8 = rng.gen_range(0..=100);
    let factors: Vec<String> = (0..rng.gen_range(0..4))
        .map(|_| random_text(rng, 4))
        .collect();
    json!({
        "potentialScore": score,
        "recommendation": random_text(rng, 6),
        "factors": factors,
        "nested": { "a": [1, 2, {"b": "}{"}], "ok": rng.gen_bool(0.5) }
    })
}

fn wrap(rng: &mut StdRng, body: &str) -> String {
    let before = PROSE.choose(rng).unwrap_or(&"");
    let after = PROSE.choose(rng).unwrap_or(&"");
    match rng.gen_range(0..4) {
        0 => body.to_string(),
        1 => format!("```json\n{}\n```", body),
        2 => format!("{}\n```\n{}\n```\n{}", before, body, after),
        _ => format!("{} {} {}", before, body, after),
    }
}

#[test]
fn sanitizer_recovers_objects_from_noise() {
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..ITERATIONS {
        let payload = random_payload(&mut rng);
        let body = if rng.gen_bool(0.5) {
            serde_json::to_string_pretty(&payload).unwrap()
        } else {
            payload.to_string()
        };
        let noisy = wrap(&mut rng, &body);

        assert_eq!(sanitize_value(&noisy), Some(payload), "input: {}", noisy);
    }
}

#[test]
fn sanitizer_rejects_text_without_an_object() {
    let mut rng = StdRng::seed_from_u64(5);

    for _ in 0..ITERATIONS {
        let text = match rng.gen_range(0..4) {
            0 => random_text(&mut rng, 20),
            1 => format!("```\n{}\n```", random_text(&mut rng, 10)),
            2 => format!("{{ {} ", random_text(&mut rng, 5)),
            _ => format!("[{}]", rng.gen_range(0..1000)),
        };
        assert_eq!(sanitize_value(&text), None, "input: {}", text);
    }
}
