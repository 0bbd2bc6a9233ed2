//! oppscore: opportunity scoring and classification engine
//!
//! Scores business observations on a 0-100 potential scale and classifies
//! them by priority. A remote generative model is tried first; a
//! deterministic local heuristic answers whenever the model cannot.
//!
//! # Example
//!
//! ```
//! use oppscore::{AnalysisOrchestrator, Observation, Sector};
//!
//! let orchestrator = AnalysisOrchestrator::new();
//! let obs = Observation::new("Idea", "Una descripción breve", Sector::Otro);
//! let result = orchestrator.analyze_local(&obs).unwrap();
//! assert!(!result.is_remote());
//! ```

pub mod analysis;
pub mod config;
pub mod model;

pub use analysis::{
    AnalysisError, AnalysisOrchestrator, AnalysisResult, AnalysisSource, Classification,
    ClassificationEngine, ClassificationLabel, ImpactLevel, LocalHeuristicScorer, MarketSize, Observation,
    RemoteAnalysisClient, Sector, UrgencyLevel,
};
pub use config::{ConfigError, EngineConfig, RemoteConfig};
pub use model::{GenerativeModel, HttpGenerativeModel, MockModel, RemoteAnalysisError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
