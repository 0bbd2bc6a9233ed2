//! Opportunity analysis pipeline
//!
//! Turns a business [`Observation`] into a normalized [`AnalysisResult`]:
//! a 0-100 potential score, market and urgency context, competitors, and a
//! three-way classification.
//!
//! # Architecture
//!
//! - **RemoteAnalysisClient**: asks a generative model for structured JSON,
//!   then sanitizes, validates, and back-fills it
//! - **LocalHeuristicScorer**: deterministic keyword and sector-table scoring
//! - **ClassificationEngine**: Crítico / Relevante / No Relevante with a
//!   justification and feasibility estimate
//! - **AnalysisOrchestrator**: remote first, local fallback on any failure
//!
//! # Example
//!
//! ```
//! use oppscore::analysis::{AnalysisOrchestrator, Observation, Sector};
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! let orchestrator = AnalysisOrchestrator::new();
//! let obs = Observation::new(
//!     "Telemedicina rural",
//!     "Consultas médicas a distancia para zonas sin hospital",
//!     Sector::Salud,
//! );
//! let result = rt.block_on(orchestrator.analyze(&obs)).unwrap();
//! assert!((35..=98).contains(&result.potential_score));
//! ```

mod classify;
mod heuristic;
mod orchestrator;
mod remote;
mod sanitize;
mod signals;
pub mod tables;
mod text;
mod types;

pub use classify::{ClassificationEngine, Feasibility};
pub use heuristic::LocalHeuristicScorer;
pub use orchestrator::AnalysisOrchestrator;
pub use remote::{build_prompt, RemoteAnalysisClient};
pub use sanitize::{sanitize, sanitize_value};
pub use signals::{derive_signals, resolve_signals};
pub use text::fold;
pub use types::{
    AnalysisError, AnalysisResult, AnalysisSource, Classification, ClassificationLabel,
    Competitor, ImpactLevel, LocalScore, MarketAnalysis, MarketSize, Observation, Sector,
    UrgencyAnalysis, UrgencyLevel, ValidationError,
};
