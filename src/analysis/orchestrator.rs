//! Analysis orchestrator: remote-first analysis with a guaranteed local fallback
//!
//! Every valid observation produces exactly one `AnalysisResult`. Remote
//! failures of any kind are logged and recovered; only input validation
//! errors reach the caller.

use super::classify::ClassificationEngine;
use super::heuristic::LocalHeuristicScorer;
use super::remote::RemoteAnalysisClient;
use super::signals::resolve_signals;
use super::types::{AnalysisError, AnalysisResult, Observation};
use crate::config::EngineConfig;
use crate::model::RemoteAnalysisError;
use dashmap::DashMap;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tokio::sync::{OnceCell, Semaphore};
use tracing::{debug, info, warn};

const DEFAULT_REMOTE_CONCURRENCY: usize = 4;
const DEFAULT_BATCH_CONCURRENCY: usize = 4;

type InFlight = DashMap<Observation, Arc<OnceCell<AnalysisResult>>>;

/// Coordinates the remote and local strategies.
pub struct AnalysisOrchestrator {
    remote: Option<RemoteAnalysisClient>,
    scorer: LocalHeuristicScorer,
    classifier: ClassificationEngine,
    /// Semaphore to limit concurrent remote calls
    remote_semaphore: Arc<Semaphore>,
    batch_concurrency: usize,
    /// Present only when request coalescing is enabled
    in_flight: Option<InFlight>,
}

impl Default for AnalysisOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisOrchestrator {
    /// Local-only orchestrator.
    pub fn new() -> Self {
        Self {
            remote: None,
            scorer: LocalHeuristicScorer::new(),
            classifier: ClassificationEngine::new(),
            remote_semaphore: Arc::new(Semaphore::new(DEFAULT_REMOTE_CONCURRENCY)),
            batch_concurrency: DEFAULT_BATCH_CONCURRENCY,
            in_flight: None,
        }
    }

    /// Try `client` before falling back to the local heuristic.
    pub fn with_remote(mut self, client: RemoteAnalysisClient) -> Self {
        self.remote = Some(client);
        self
    }

    /// Create with a specific remote concurrency limit
    pub fn with_remote_concurrency(mut self, limit: usize) -> Self {
        self.remote_semaphore = Arc::new(Semaphore::new(limit.max(1)));
        self
    }

    /// Maximum analyses in flight during `analyze_batch`.
    pub fn with_batch_concurrency(mut self, limit: usize) -> Self {
        self.batch_concurrency = limit.max(1);
        self
    }

    /// Share one analysis between concurrent calls for identical observations.
    ///
    /// Entries live only while their analysis runs; nothing is cached.
    pub fn with_request_coalescing(mut self) -> Self {
        self.in_flight = Some(DashMap::new());
        self
    }

    /// Build from engine settings. A remote client is attached only when the
    /// config enables it and carries an API key.
    pub fn from_config(config: &EngineConfig) -> Result<Self, RemoteAnalysisError> {
        let mut orchestrator = Self::new()
            .with_remote_concurrency(config.remote_concurrency)
            .with_batch_concurrency(config.remote_concurrency);

        if config.remote_enabled() {
            orchestrator = orchestrator.with_remote(RemoteAnalysisClient::from_config(&config.remote)?);
        }
        if config.coalesce_requests {
            orchestrator = orchestrator.with_request_coalescing();
        }
        Ok(orchestrator)
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Analyze one observation.
    pub async fn analyze(&self, observation: &Observation) -> Result<AnalysisResult, AnalysisError> {
        observation.validate()?;

        match &self.in_flight {
            Some(in_flight) => Ok(self.coalesced(in_flight, observation).await),
            None => Ok(self.run(observation).await),
        }
    }

    /// Analyze with the local heuristic only, skipping any remote client.
    pub fn analyze_local(&self, observation: &Observation) -> Result<AnalysisResult, AnalysisError> {
        observation.validate()?;
        Ok(self.local(observation))
    }

    /// Analyze many observations concurrently. Results keep input order.
    pub async fn analyze_batch(
        &self,
        observations: &[Observation],
    ) -> Vec<Result<AnalysisResult, AnalysisError>> {
        info!(
            count = observations.len(),
            concurrency = self.batch_concurrency,
            "starting batch analysis"
        );

        let results: Vec<_> = stream::iter(observations)
            .map(|observation| self.analyze(observation))
            .buffered(self.batch_concurrency)
            .collect()
            .await;

        let remote = results
            .iter()
            .filter(|r| matches!(r, Ok(result) if result.is_remote()))
            .count();
        let failed = results.iter().filter(|r| r.is_err()).count();
        info!(
            count = results.len(),
            remote,
            local = results.len() - remote - failed,
            rejected = failed,
            "batch analysis complete"
        );

        results
    }

    async fn coalesced(&self, in_flight: &InFlight, observation: &Observation) -> AnalysisResult {
        let cell = in_flight
            .entry(observation.clone())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .value()
            .clone();

        let result = cell.get_or_init(|| self.run(observation)).await.clone();

        in_flight.remove_if(observation, |_, current| Arc::ptr_eq(current, &cell));
        result
    }

    async fn run(&self, observation: &Observation) -> AnalysisResult {
        if let Some(remote) = &self.remote {
            match self.try_remote(remote, observation).await {
                Ok(result) => {
                    debug!(
                        observation = %observation.id,
                        score = result.potential_score,
                        "remote analysis accepted"
                    );
                    return result;
                }
                Err(e) => {
                    warn!(
                        observation = %observation.id,
                        error = %e,
                        "remote analysis failed, falling back to local heuristic"
                    );
                }
            }
        }
        self.local(observation)
    }

    async fn try_remote(
        &self,
        remote: &RemoteAnalysisClient,
        observation: &Observation,
    ) -> Result<AnalysisResult, RemoteAnalysisError> {
        // The timeout covers the call itself, not time spent queued here
        let _permit = self
            .remote_semaphore
            .acquire()
            .await
            .map_err(|e| RemoteAnalysisError::Transport(format!("semaphore error: {}", e)))?;
        remote.analyze(observation).await
    }

    fn local(&self, observation: &Observation) -> AnalysisResult {
        let score = self.scorer.score_locally(observation);
        let (impact, urgency) = resolve_signals(observation);
        let classification = self
            .classifier
            .classify_observation(observation, impact, urgency);
        AnalysisResult::from_local(score, classification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::{AnalysisSource, Sector, ValidationError};
    use crate::model::MockModel;
    use std::time::Duration;

    fn observation() -> Observation {
        Observation::new(
            "App de reciclaje",
            "Aplicación que conecta hogares con recicladores locales",
            Sector::MedioAmbiente,
        )
        .with_id("obs-1")
    }

    fn remote(model: Arc<MockModel>) -> RemoteAnalysisClient {
        RemoteAnalysisClient::new(model, Duration::from_secs(30))
    }

    #[tokio::test]
    async fn local_only_orchestrator_uses_heuristic() {
        let result = AnalysisOrchestrator::new()
            .analyze(&observation())
            .await
            .unwrap();
        assert_eq!(result.source, AnalysisSource::LocalHeuristic);
        assert!((35..=98).contains(&result.potential_score));
    }

    #[tokio::test]
    async fn remote_failure_falls_back() {
        let model = Arc::new(MockModel::failing(RemoteAnalysisError::Transport(
            "connection refused".into(),
        )));
        let orchestrator = AnalysisOrchestrator::new().with_remote(remote(model.clone()));

        let result = orchestrator.analyze(&observation()).await.unwrap();
        assert_eq!(result.source, AnalysisSource::LocalHeuristic);
        assert_eq!(model.calls(), 1);
    }

    #[tokio::test]
    async fn fallback_matches_local_path() {
        let model = Arc::new(MockModel::responding("no es JSON"));
        let orchestrator = AnalysisOrchestrator::new().with_remote(remote(model));

        let obs = observation();
        let fallback = orchestrator.analyze(&obs).await.unwrap();
        let mut local = orchestrator.analyze_local(&obs).unwrap();
        local.timestamp = fallback.timestamp;
        assert_eq!(fallback, local);
    }

    #[tokio::test]
    async fn remote_success_is_tagged() {
        let model = Arc::new(MockModel::responding(
            r#"{"potentialScore": 77, "recommendation": "Probar en un barrio"}"#,
        ));
        let orchestrator = AnalysisOrchestrator::new().with_remote(remote(model));

        let result = orchestrator.analyze(&observation()).await.unwrap();
        assert!(result.is_remote());
        assert_eq!(result.potential_score, 77);
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_the_model() {
        let model = Arc::new(MockModel::responding("{}"));
        let orchestrator = AnalysisOrchestrator::new().with_remote(remote(model.clone()));

        let obs = Observation::new("", "algo", Sector::Otro);
        let err = orchestrator.analyze(&obs).await.unwrap_err();
        assert_eq!(err, AnalysisError::Validation(ValidationError::EmptyTitle));
        assert_eq!(model.calls(), 0);

        assert!(orchestrator.analyze_local(&obs).is_err());
    }

    #[tokio::test]
    async fn coalesced_entries_are_removed() {
        let orchestrator = AnalysisOrchestrator::new().with_request_coalescing();
        orchestrator.analyze(&observation()).await.unwrap();
        assert!(orchestrator
            .in_flight
            .as_ref()
            .map(|m| m.is_empty())
            .unwrap_or(false));
    }

    #[test]
    fn config_without_key_stays_local() {
        let orchestrator = AnalysisOrchestrator::from_config(&EngineConfig::default()).unwrap();
        assert!(!orchestrator.has_remote());
    }

    #[test]
    fn config_with_key_attaches_remote() {
        let mut config = EngineConfig::default();
        config.remote.api_key = "secret".into();
        config.coalesce_requests = true;
        let orchestrator = AnalysisOrchestrator::from_config(&config).unwrap();
        assert!(orchestrator.has_remote());
        assert!(orchestrator.in_flight.is_some());
    }
}
