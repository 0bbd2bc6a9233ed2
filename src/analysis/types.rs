//! Core types for the opportunity analysis pipeline
//!
//! `Observation` is the input contract, `AnalysisResult` the single normalized
//! output produced by either the remote model or the local heuristic.

use super::text::fold;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Business sector of an observation.
///
/// The wire form is the Spanish display name. Parsing folds case and accents,
/// and anything unrecognized becomes [`Sector::Otro`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sector {
    Tecnologia,
    Salud,
    Educacion,
    Finanzas,
    Comercio,
    Alimentacion,
    Transporte,
    Energia,
    MedioAmbiente,
    Entretenimiento,
    Turismo,
    Inmobiliario,
    Agricultura,
    Otro,
}

impl Sector {
    pub const ALL: [Sector; 14] = [
        Sector::Tecnologia,
        Sector::Salud,
        Sector::Educacion,
        Sector::Finanzas,
        Sector::Comercio,
        Sector::Alimentacion,
        Sector::Transporte,
        Sector::Energia,
        Sector::MedioAmbiente,
        Sector::Entretenimiento,
        Sector::Turismo,
        Sector::Inmobiliario,
        Sector::Agricultura,
        Sector::Otro,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sector::Tecnologia => "Tecnología",
            Sector::Salud => "Salud",
            Sector::Educacion => "Educación",
            Sector::Finanzas => "Finanzas",
            Sector::Comercio => "Comercio",
            Sector::Alimentacion => "Alimentación",
            Sector::Transporte => "Transporte",
            Sector::Energia => "Energía",
            Sector::MedioAmbiente => "Medio Ambiente",
            Sector::Entretenimiento => "Entretenimiento",
            Sector::Turismo => "Turismo",
            Sector::Inmobiliario => "Inmobiliario",
            Sector::Agricultura => "Agricultura",
            Sector::Otro => "Otro",
        }
    }

    /// Lenient parse: case and accent insensitive, unknown names map to `Otro`.
    pub fn parse(name: &str) -> Self {
        let folded = fold(name.trim());
        Sector::ALL
            .into_iter()
            .find(|s| fold(s.as_str()) == folded)
            .unwrap_or_else(|| match folded.as_str() {
                "medioambiente" | "ambiente" => Sector::MedioAmbiente,
                "tech" | "tecnologias" => Sector::Tecnologia,
                _ => Sector::Otro,
            })
    }
}

impl From<String> for Sector {
    fn from(s: String) -> Self {
        Sector::parse(&s)
    }
}

impl From<Sector> for String {
    fn from(s: Sector) -> Self {
        s.as_str().to_string()
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Estimated impact of the problem an observation describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ImpactLevel {
    Bajo,
    Medio,
    Alto,
    #[serde(rename = "Muy Alto", alias = "MuyAlto")]
    MuyAlto,
}

impl ImpactLevel {
    pub const ALL: [ImpactLevel; 4] = [
        ImpactLevel::Bajo,
        ImpactLevel::Medio,
        ImpactLevel::Alto,
        ImpactLevel::MuyAlto,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImpactLevel::Bajo => "Bajo",
            ImpactLevel::Medio => "Medio",
            ImpactLevel::Alto => "Alto",
            ImpactLevel::MuyAlto => "Muy Alto",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match fold(name.trim()).replace([' ', '_', '-'], "").as_str() {
            "bajo" | "baja" | "low" => Some(ImpactLevel::Bajo),
            "medio" | "media" | "medium" => Some(ImpactLevel::Medio),
            "alto" | "alta" | "high" => Some(ImpactLevel::Alto),
            "muyalto" | "muyalta" | "veryhigh" => Some(ImpactLevel::MuyAlto),
            _ => None,
        }
    }
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ImpactLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ImpactLevel::parse(s).ok_or_else(|| format!("unknown impact level '{}'", s))
    }
}

/// How pressing the problem an observation describes is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UrgencyLevel {
    Baja,
    Media,
    Alta,
    #[serde(rename = "Crítica", alias = "Critica")]
    Critica,
}

impl UrgencyLevel {
    pub const ALL: [UrgencyLevel; 4] = [
        UrgencyLevel::Baja,
        UrgencyLevel::Media,
        UrgencyLevel::Alta,
        UrgencyLevel::Critica,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyLevel::Baja => "Baja",
            UrgencyLevel::Media => "Media",
            UrgencyLevel::Alta => "Alta",
            UrgencyLevel::Critica => "Crítica",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match fold(name.trim()).as_str() {
            "baja" | "bajo" | "low" => Some(UrgencyLevel::Baja),
            "media" | "medio" | "medium" => Some(UrgencyLevel::Media),
            "alta" | "alto" | "high" => Some(UrgencyLevel::Alta),
            "critica" | "critico" | "critical" => Some(UrgencyLevel::Critica),
            _ => None,
        }
    }
}

impl fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UrgencyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UrgencyLevel::parse(s).ok_or_else(|| format!("unknown urgency level '{}'", s))
    }
}

/// Market size bucket derived from the potential score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketSize {
    #[serde(rename = "Pequeño", alias = "Pequeno")]
    Pequeno,
    Mediano,
    Grande,
    #[serde(rename = "Muy Grande", alias = "MuyGrande")]
    MuyGrande,
}

impl MarketSize {
    /// Bucket thresholds: >90 Muy Grande, >80 Grande, >70 Mediano.
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s > 90 => MarketSize::MuyGrande,
            s if s > 80 => MarketSize::Grande,
            s if s > 70 => MarketSize::Mediano,
            _ => MarketSize::Pequeno,
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match fold(name.trim()).replace(' ', "").as_str() {
            "pequeño" | "pequeno" | "small" => Some(MarketSize::Pequeno),
            "mediano" | "medium" => Some(MarketSize::Mediano),
            "grande" | "large" => Some(MarketSize::Grande),
            "muygrande" | "verylarge" => Some(MarketSize::MuyGrande),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MarketSize::Pequeno => "Pequeño",
            MarketSize::Mediano => "Mediano",
            MarketSize::Grande => "Grande",
            MarketSize::MuyGrande => "Muy Grande",
        }
    }
}

/// Three-way priority label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassificationLabel {
    #[serde(rename = "Crítico", alias = "Critico")]
    Critico,
    Relevante,
    #[serde(rename = "No Relevante", alias = "NoRelevante")]
    NoRelevante,
}

impl ClassificationLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassificationLabel::Critico => "Crítico",
            ClassificationLabel::Relevante => "Relevante",
            ClassificationLabel::NoRelevante => "No Relevante",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match fold(name.trim()).replace([' ', '_', '-'], "").as_str() {
            "critico" | "critica" | "critical" => Some(ClassificationLabel::Critico),
            "relevante" | "relevant" => Some(ClassificationLabel::Relevante),
            "norelevante" | "irrelevante" | "notrelevant" => Some(ClassificationLabel::NoRelevante),
            _ => None,
        }
    }
}

impl fmt::Display for ClassificationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which strategy produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnalysisSource {
    RemoteModel,
    LocalHeuristic,
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A user-submitted business observation or idea.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub sector: Sector,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Caller-supplied impact; derived from the text when absent
    #[serde(default)]
    pub impact: Option<ImpactLevel>,
    /// Caller-supplied urgency; derived from the text when absent
    #[serde(default)]
    pub urgency: Option<UrgencyLevel>,
}

impl Observation {
    pub fn new(title: impl Into<String>, description: impl Into<String>, sector: Sector) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: description.into(),
            sector,
            subcategory: None,
            tags: Vec::new(),
            impact: None,
            urgency: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_impact(mut self, impact: ImpactLevel) -> Self {
        self.impact = Some(impact);
        self
    }

    pub fn with_urgency(mut self, urgency: UrgencyLevel) -> Self {
        self.urgency = Some(urgency);
        self
    }

    /// Reject inputs neither strategy can say anything meaningful about.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        Ok(())
    }

    /// Title and description joined, the text every keyword scan runs over.
    pub fn full_text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAnalysis {
    pub companies_count: u64,
    pub market_growth_pct: f64,
    pub investment_volume: String,
    pub avg_company_value: String,
    pub saturation_index: f64,
}

impl MarketAnalysis {
    /// Force values coming from untrusted sources back into range.
    pub fn clamped(mut self) -> Self {
        self.saturation_index = if self.saturation_index.is_finite() {
            self.saturation_index.clamp(0.0, 1.0)
        } else {
            0.0
        };
        if !self.market_growth_pct.is_finite() {
            self.market_growth_pct = 0.0;
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrgencyAnalysis {
    pub trend: String,
    pub growth_rate: String,
    pub disruption_risk: String,
    pub time_to_market: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    pub name: String,
    #[serde(default, deserialize_with = "lenient_index")]
    pub innovation_index: u8,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub founded: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub hq: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub market_cap: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub employees: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub revenue: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub key_products: Vec<String>,
}

/// Accept integers, floats, or numeric strings; clamp into 0..=100.
fn lenient_index<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    let raw = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().trim_end_matches('%').parse::<f64>().ok(),
        _ => None,
    };
    Ok(raw
        .filter(|v| v.is_finite())
        .map(|v| v.round().clamp(0.0, 100.0) as u8)
        .unwrap_or(0))
}

/// Accept strings, numbers, or null where a display string is expected.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Accept either a list of strings or a single comma-separated string.
fn lenient_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|v| match v {
                serde_json::Value::String(s) => Some(s),
                serde_json::Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        serde_json::Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub label: ClassificationLabel,
    /// Raw classification score, rounded to one decimal, never negative
    pub score: f64,
    pub justification: String,
    pub feasibility: String,
}

/// Output of the local heuristic scorer, before classification is attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalScore {
    pub potential_score: u8,
    pub market_size: MarketSize,
    pub competition: String,
    pub recommendation: String,
    pub factors: Vec<String>,
    pub market_analysis: MarketAnalysis,
    pub urgency_analysis: UrgencyAnalysis,
    pub competitors: Vec<Competitor>,
}

/// The normalized analysis contract returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub potential_score: u8,
    pub market_size: MarketSize,
    pub competition: String,
    pub recommendation: String,
    pub factors: Vec<String>,
    pub market_analysis: MarketAnalysis,
    pub urgency_analysis: UrgencyAnalysis,
    pub competitors: Vec<Competitor>,
    pub classification: Classification,
    pub source: AnalysisSource,
    pub timestamp: DateTime<Utc>,
}

impl AnalysisResult {
    /// Merge a local score and its classification into the normalized shape.
    pub fn from_local(score: LocalScore, classification: Classification) -> Self {
        Self {
            potential_score: score.potential_score,
            market_size: score.market_size,
            competition: score.competition,
            recommendation: score.recommendation,
            factors: score.factors,
            market_analysis: score.market_analysis,
            urgency_analysis: score.urgency_analysis,
            competitors: score.competitors,
            classification,
            source: AnalysisSource::LocalHeuristic,
            timestamp: Utc::now(),
        }
    }

    pub fn is_remote(&self) -> bool {
        self.source == AnalysisSource::RemoteModel
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Input rejected before any strategy runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("observation title must not be empty")]
    EmptyTitle,
    #[error("observation description must not be empty")]
    EmptyDescription,
}

/// The only error the orchestrator surfaces to callers.
///
/// Remote failures are recovered by the local fallback and never appear here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("invalid observation: {0}")]
    Validation(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sector_parse_is_accent_and_case_insensitive() {
        assert_eq!(Sector::parse("tecnologia"), Sector::Tecnologia);
        assert_eq!(Sector::parse("TECNOLOGÍA"), Sector::Tecnologia);
        assert_eq!(Sector::parse("medio ambiente"), Sector::MedioAmbiente);
        assert_eq!(Sector::parse("Otros"), Sector::Otro);
        assert_eq!(Sector::parse("astrología"), Sector::Otro);
    }

    #[test]
    fn sector_serializes_as_display_name() {
        let json = serde_json::to_string(&Sector::Educacion).unwrap();
        assert_eq!(json, "\"Educación\"");
        let back: Sector = serde_json::from_str("\"educacion\"").unwrap();
        assert_eq!(back, Sector::Educacion);
    }

    #[test]
    fn levels_parse_leniently() {
        assert_eq!(ImpactLevel::parse("Muy Alto"), Some(ImpactLevel::MuyAlto));
        assert_eq!(ImpactLevel::parse("muy_alto"), Some(ImpactLevel::MuyAlto));
        assert_eq!(UrgencyLevel::parse("CRÍTICA"), Some(UrgencyLevel::Critica));
        assert_eq!(UrgencyLevel::parse("pronto"), None);
    }

    #[test]
    fn market_size_thresholds() {
        assert_eq!(MarketSize::from_score(91), MarketSize::MuyGrande);
        assert_eq!(MarketSize::from_score(90), MarketSize::Grande);
        assert_eq!(MarketSize::from_score(81), MarketSize::Grande);
        assert_eq!(MarketSize::from_score(71), MarketSize::Mediano);
        assert_eq!(MarketSize::from_score(70), MarketSize::Pequeno);
    }

    #[test]
    fn validation_rejects_blank_fields() {
        let obs = Observation::new("  ", "desc", Sector::Salud);
        assert_eq!(obs.validate(), Err(ValidationError::EmptyTitle));

        let obs = Observation::new("title", "\n", Sector::Salud);
        assert_eq!(obs.validate(), Err(ValidationError::EmptyDescription));

        let obs = Observation::new("title", "desc", Sector::Salud);
        assert!(obs.validate().is_ok());
    }

    #[test]
    fn competitor_accepts_numeric_and_csv_fields() {
        let competitor: Competitor = serde_json::from_value(serde_json::json!({
            "name": "Acme",
            "innovationIndex": 80,
            "founded": 1998,
            "employees": null,
            "keyProducts": "Uno, Dos"
        }))
        .unwrap();

        assert_eq!(competitor.founded, "1998");
        assert_eq!(competitor.employees, "");
        assert_eq!(competitor.key_products, vec!["Uno", "Dos"]);
    }

    #[test]
    fn market_analysis_clamps_saturation() {
        let market = MarketAnalysis {
            companies_count: 1,
            market_growth_pct: f64::NAN,
            investment_volume: String::new(),
            avg_company_value: String::new(),
            saturation_index: 1.7,
        }
        .clamped();

        assert_eq!(market.saturation_index, 1.0);
        assert_eq!(market.market_growth_pct, 0.0);
    }
}
