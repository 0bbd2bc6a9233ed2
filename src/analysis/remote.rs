//! Remote analysis client: structured analysis from a generative model
//!
//! The client:
//! 1. Builds a prompt from the observation
//! 2. Makes exactly one `generate` call, bounded by the configured timeout
//! 3. Extracts the candidate text and sanitizes it into a JSON object
//! 4. Validates mandatory fields and back-fills optional structures
//!
//! Mandatory: `potentialScore` (number or numeric string) and a non-empty
//! `recommendation`. Everything else has a documented default:
//! - `marketAnalysis`, `urgencyAnalysis`, `competitors`: the sector tables
//! - `marketSize`: bucketed from the score
//! - `classification`: computed locally from the model's own impact and
//!   urgency estimates when present

use super::classify::{self, ClassificationEngine};
use super::sanitize::sanitize_value;
use super::signals::derive_signals;
use super::tables;
use super::text::fold;
use super::types::{
    AnalysisResult, AnalysisSource, Classification, ClassificationLabel, Competitor,
    ImpactLevel, MarketAnalysis, MarketSize, Observation, UrgencyAnalysis, UrgencyLevel,
};
use crate::config::RemoteConfig;
use crate::model::{GenerativeModel, HttpGenerativeModel, RemoteAnalysisError};
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Build the analysis prompt for an observation.
pub fn build_prompt(observation: &Observation) -> String {
    let tags = if observation.tags.is_empty() {
        "ninguna".to_string()
    } else {
        observation.tags.join(", ")
    };
    let subcategory = observation.subcategory.as_deref().unwrap_or("no indicada");

    format!(
        r#"Eres un analista de mercado experto. Analiza la siguiente observación de negocio y responde ÚNICAMENTE con un objeto JSON válido, sin texto adicional.

Título: {title}
Descripción: {description}
Sector: {sector}
Subcategoría: {subcategory}
Etiquetas: {tags}

Estructura requerida:
{{
  "potentialScore": <entero 0-100>,
  "marketSize": "Pequeño" | "Mediano" | "Grande" | "Muy Grande",
  "competition": "<nivel de competencia>",
  "recommendation": "<recomendación concreta>",
  "factors": ["<factor>", ...],
  "impactLevel": "Bajo" | "Medio" | "Alto" | "Muy Alto",
  "urgencyLevel": "Baja" | "Media" | "Alta" | "Crítica",
  "marketAnalysis": {{
    "companiesCount": <entero>,
    "marketGrowthPct": <número>,
    "investmentVolume": "<texto>",
    "avgCompanyValue": "<texto>",
    "saturationIndex": <número 0-1>
  }},
  "urgencyAnalysis": {{
    "trend": "<texto>",
    "growthRate": "<texto>",
    "disruptionRisk": "<texto>",
    "timeToMarket": "<texto>"
  }},
  "competitors": [
    {{ "name": "<nombre>", "innovationIndex": <0-100>, "description": "<texto>", "founded": "<año>", "hq": "<sede>", "marketCap": "<texto>", "employees": "<texto>", "revenue": "<texto>", "keyProducts": ["<producto>"] }}
  ],
  "classification": {{
    "label": "Crítico" | "Relevante" | "No Relevante",
    "score": <número>,
    "justification": "<texto>",
    "feasibility": "<texto>"
  }}
}}"#,
        title = observation.title,
        description = observation.description,
        sector = observation.sector,
        subcategory = subcategory,
        tags = tags,
    )
}

/// Client for the remote analysis strategy.
pub struct RemoteAnalysisClient {
    model: Arc<dyn GenerativeModel>,
    timeout: Duration,
    classifier: ClassificationEngine,
}

impl RemoteAnalysisClient {
    pub fn new(model: Arc<dyn GenerativeModel>, timeout: Duration) -> Self {
        Self {
            model,
            timeout,
            classifier: ClassificationEngine::new(),
        }
    }

    /// Client backed by the HTTP transport described by `config`.
    pub fn from_config(config: &RemoteConfig) -> Result<Self, RemoteAnalysisError> {
        let model = HttpGenerativeModel::new(config.clone())?;
        Ok(Self::new(Arc::new(model), config.timeout()))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Run one remote analysis. The result is always tagged `RemoteModel`.
    pub async fn analyze(
        &self,
        observation: &Observation,
    ) -> Result<AnalysisResult, RemoteAnalysisError> {
        let prompt = build_prompt(observation);

        let envelope = tokio::time::timeout(self.timeout, self.model.generate(&prompt))
            .await
            .map_err(|_| RemoteAnalysisError::Timeout(self.timeout))??;

        let text = envelope
            .first_text()
            .ok_or(RemoteAnalysisError::NoCandidate)?;

        debug!(
            model = self.model.name(),
            chars = text.chars().count(),
            "remote analysis response received"
        );

        self.parse_response(text, observation)
    }

    /// Validate model text against the analysis schema.
    pub fn parse_response(
        &self,
        text: &str,
        observation: &Observation,
    ) -> Result<AnalysisResult, RemoteAnalysisError> {
        let payload = sanitize_value(text).ok_or_else(|| {
            RemoteAnalysisError::Malformed(format!(
                "no JSON object in model output: {}",
                preview(text)
            ))
        })?;

        let potential_score = payload
            .get("potentialScore")
            .and_then(coerce_score)
            .ok_or_else(|| {
                RemoteAnalysisError::Malformed("missing or non-numeric potentialScore".into())
            })?;

        let recommendation = payload
            .get("recommendation")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| RemoteAnalysisError::Malformed("missing recommendation".into()))?
            .to_string();

        let sector = observation.sector;
        let profile = tables::profile(sector);

        let market_size = payload
            .get("marketSize")
            .and_then(Value::as_str)
            .and_then(MarketSize::parse)
            .unwrap_or_else(|| MarketSize::from_score(potential_score));

        let competition = non_empty_str(&payload, "competition")
            .unwrap_or(profile.competition)
            .to_string();

        let factors = payload
            .get("factors")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let market_analysis = payload
            .get("marketAnalysis")
            .and_then(|v| serde_json::from_value::<MarketAnalysis>(v.clone()).ok())
            .map(MarketAnalysis::clamped)
            .unwrap_or_else(|| tables::market_analysis(sector));

        let (impact, urgency) = self.signals(&payload, observation);

        let urgency_analysis = payload
            .get("urgencyAnalysis")
            .and_then(|v| serde_json::from_value::<UrgencyAnalysis>(v.clone()).ok())
            .unwrap_or_else(|| tables::urgency_analysis(sector, impact));

        let competitors = parse_competitors(&payload)
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| tables::top_competitors(sector));

        let classification = payload
            .get("classification")
            .and_then(|v| parse_classification(v, observation))
            .unwrap_or_else(|| self.classifier.classify_observation(observation, impact, urgency));

        Ok(AnalysisResult {
            potential_score,
            market_size,
            competition,
            recommendation,
            factors,
            market_analysis,
            urgency_analysis,
            competitors,
            classification,
            source: AnalysisSource::RemoteModel,
            timestamp: Utc::now(),
        })
    }

    /// Caller-supplied signals first, then the model's estimates, then the
    /// text heuristic.
    fn signals(&self, payload: &Value, observation: &Observation) -> (ImpactLevel, UrgencyLevel) {
        let model_impact = payload
            .get("impactLevel")
            .and_then(Value::as_str)
            .and_then(ImpactLevel::parse);
        let model_urgency = payload
            .get("urgencyLevel")
            .and_then(Value::as_str)
            .and_then(UrgencyLevel::parse);

        let impact = observation.impact.or(model_impact);
        let urgency = observation.urgency.or(model_urgency);
        match (impact, urgency) {
            (Some(i), Some(u)) => (i, u),
            _ => {
                let (derived_impact, derived_urgency) = derive_signals(observation);
                (
                    impact.unwrap_or(derived_impact),
                    urgency.unwrap_or(derived_urgency),
                )
            }
        }
    }
}

/// Accept integer, float, or numeric-string scores; round and clamp to 0..=100.
fn coerce_score(value: &Value) -> Option<u8> {
    let raw = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    raw.is_finite().then(|| raw.round().clamp(0.0, 100.0) as u8)
}

fn non_empty_str<'a>(payload: &'a Value, key: &str) -> Option<&'a str> {
    payload
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Parse each competitor on its own; entries without a name are dropped.
fn parse_competitors(payload: &Value) -> Option<Vec<Competitor>> {
    let items = payload.get("competitors")?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(|item| serde_json::from_value::<Competitor>(item.clone()).ok())
            .filter(|c| !c.name.trim().is_empty())
            .collect(),
    )
}

/// A model-supplied classification, if it is structurally complete.
///
/// A missing feasibility is filled in locally rather than rejecting the block.
fn parse_classification(value: &Value, observation: &Observation) -> Option<Classification> {
    let label = value
        .get("label")
        .and_then(Value::as_str)
        .and_then(ClassificationLabel::parse)?;
    let score = value.get("score").and_then(|s| match s {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    })?;
    if !score.is_finite() {
        return None;
    }
    let justification = non_empty_str(value, "justification")?.to_string();
    let feasibility = non_empty_str(value, "feasibility")
        .map(String::from)
        .unwrap_or_else(|| {
            classify::feasibility(
                &fold(&observation.full_text()),
                observation.sector,
                observation.description.chars().count(),
            )
            .as_str()
            .to_string()
        });

    Some(Classification {
        label,
        score: (score.max(0.0) * 10.0).round() / 10.0,
        justification,
        feasibility,
    })
}

fn preview(text: &str) -> String {
    text.chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::Sector;
    use crate::model::{GenerateContentResponse, MockModel};
    use serde_json::json;

    fn observation() -> Observation {
        Observation::new(
            "Telemedicina rural",
            "Consultas médicas a distancia para zonas rurales sin hospital cercano",
            Sector::Salud,
        )
    }

    fn client(model: MockModel) -> RemoteAnalysisClient {
        RemoteAnalysisClient::new(Arc::new(model), Duration::from_secs(30))
    }

    fn full_payload() -> Value {
        json!({
            "potentialScore": 87,
            "marketSize": "Grande",
            "competition": "Media",
            "recommendation": "Lanzar un piloto con dos clínicas",
            "factors": ["Demanda desatendida", "Bajo coste de adopción"],
            "impactLevel": "Alto",
            "urgencyLevel": "Alta",
            "marketAnalysis": {
                "companiesCount": 1200,
                "marketGrowthPct": 14.5,
                "investmentVolume": "$40B",
                "avgCompanyValue": "$30M",
                "saturationIndex": 0.2
            },
            "urgencyAnalysis": {
                "trend": "Alto crecimiento",
                "growthRate": "14% anual",
                "disruptionRisk": "Alto",
                "timeToMarket": "6-12 meses"
            },
            "competitors": [{
                "name": "Teladoc",
                "innovationIndex": 82,
                "description": "Telemedicina",
                "founded": 2002,
                "hq": "EE. UU.",
                "marketCap": "$2B",
                "employees": "5,600",
                "revenue": "$2.6B",
                "keyProducts": ["Consultas virtuales"]
            }],
            "classification": {
                "label": "Relevante",
                "score": 6.44,
                "justification": "Necesidad clara en zonas rurales",
                "feasibility": "Soluble a corto plazo"
            }
        })
    }

    #[tokio::test]
    async fn complete_payload_is_used_verbatim() {
        let text = format!("```json\n{}\n```", full_payload());
        let result = client(MockModel::responding(text))
            .analyze(&observation())
            .await
            .unwrap();

        assert_eq!(result.source, AnalysisSource::RemoteModel);
        assert_eq!(result.potential_score, 87);
        assert_eq!(result.market_size, MarketSize::Grande);
        assert_eq!(result.factors.len(), 2);
        assert_eq!(result.market_analysis.companies_count, 1200);
        assert_eq!(result.competitors.len(), 1);
        assert_eq!(result.competitors[0].founded, "2002");
        assert_eq!(result.classification.label, ClassificationLabel::Relevante);
        assert_eq!(result.classification.score, 6.4);
    }

    #[tokio::test]
    async fn partial_payload_is_back_filled() {
        let text = r#"Resultado: {"potentialScore": "91.6", "recommendation": "Avanzar"}"#;
        let result = client(MockModel::responding(text))
            .analyze(&observation())
            .await
            .unwrap();

        assert_eq!(result.source, AnalysisSource::RemoteModel);
        assert_eq!(result.potential_score, 92);
        assert_eq!(result.market_size, MarketSize::MuyGrande);
        assert_eq!(result.competition, "Media-Alta");
        assert!(result.factors.is_empty());
        assert_eq!(result.market_analysis, tables::market_analysis(Sector::Salud));
        assert_eq!(result.competitors, tables::top_competitors(Sector::Salud));
        assert!(!result.classification.justification.is_empty());
    }

    #[tokio::test]
    async fn out_of_range_values_are_clamped() {
        let text = json!({
            "potentialScore": 140,
            "recommendation": "Sí",
            "marketAnalysis": {
                "companiesCount": 10,
                "marketGrowthPct": 3.0,
                "investmentVolume": "$1M",
                "avgCompanyValue": "$1K",
                "saturationIndex": 4.0
            },
            "classification": {
                "label": "Crítico",
                "score": -2,
                "justification": "x"
            }
        })
        .to_string();
        let result = client(MockModel::responding(text))
            .analyze(&observation())
            .await
            .unwrap();

        assert_eq!(result.potential_score, 100);
        assert_eq!(result.market_analysis.saturation_index, 1.0);
        assert_eq!(result.classification.score, 0.0);
        assert!(!result.classification.feasibility.is_empty());
    }

    #[tokio::test]
    async fn missing_recommendation_is_malformed() {
        let result = client(MockModel::responding(r#"{"potentialScore": 80}"#))
            .analyze(&observation())
            .await;
        assert!(matches!(result, Err(RemoteAnalysisError::Malformed(_))));
    }

    #[tokio::test]
    async fn missing_score_is_malformed() {
        let result = client(MockModel::responding(r#"{"recommendation": "ok"}"#))
            .analyze(&observation())
            .await;
        assert!(matches!(result, Err(RemoteAnalysisError::Malformed(_))));
    }

    #[tokio::test]
    async fn prose_only_is_malformed() {
        let result = client(MockModel::responding("Lo siento, no puedo ayudar con eso."))
            .analyze(&observation())
            .await;
        assert!(matches!(result, Err(RemoteAnalysisError::Malformed(_))));
    }

    #[tokio::test]
    async fn empty_envelope_has_no_candidate() {
        let model = MockModel::with_envelope(GenerateContentResponse::default());
        let result = client(model).analyze(&observation()).await;
        assert_eq!(result.unwrap_err(), RemoteAnalysisError::NoCandidate);
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let model = MockModel::failing(RemoteAnalysisError::Transport("503".into()));
        let result = client(model).analyze(&observation()).await;
        assert!(result.unwrap_err().is_transport());
    }

    #[tokio::test]
    async fn slow_model_times_out() {
        let model = MockModel::responding(full_payload().to_string())
            .with_delay(Duration::from_secs(5));
        let client = RemoteAnalysisClient::new(Arc::new(model), Duration::from_millis(50));
        let result = client.analyze(&observation()).await;
        assert_eq!(
            result.unwrap_err(),
            RemoteAnalysisError::Timeout(Duration::from_millis(50))
        );
    }

    #[test]
    fn model_signals_feed_fallback_classification() {
        let client = client(MockModel::responding(""));
        let payload = json!({
            "potentialScore": 70,
            "recommendation": "Evaluar",
            "impactLevel": "Muy Alto",
            "urgencyLevel": "Crítica"
        });
        let result = client
            .parse_response(&payload.to_string(), &observation())
            .unwrap();

        let expected = ClassificationEngine::new().classify_observation(
            &observation(),
            ImpactLevel::MuyAlto,
            UrgencyLevel::Critica,
        );
        assert_eq!(result.classification, expected);
    }

    #[test]
    fn prompt_mentions_observation_fields() {
        let obs = observation()
            .with_tags(["salud", "rural"])
            .with_subcategory("Atención primaria");
        let prompt = build_prompt(&obs);
        assert!(prompt.contains("Telemedicina rural"));
        assert!(prompt.contains("Sector: Salud"));
        assert!(prompt.contains("salud, rural"));
        assert!(prompt.contains("Atención primaria"));
        assert!(prompt.contains("\"potentialScore\""));
    }

    #[test]
    fn coerce_score_variants() {
        assert_eq!(coerce_score(&json!(85)), Some(85));
        assert_eq!(coerce_score(&json!(85.4)), Some(85));
        assert_eq!(coerce_score(&json!(" 70 ")), Some(70));
        assert_eq!(coerce_score(&json!(-5)), Some(0));
        assert_eq!(coerce_score(&json!("alto")), None);
        assert_eq!(coerce_score(&json!(null)), None);
    }
}
