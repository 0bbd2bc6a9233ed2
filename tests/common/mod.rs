//! Shared fixtures for oppscore integration tests
//!
//! Observations for the documented scenarios, payload builders, and an
//! orchestrator wired to a mock model.

#![allow(dead_code)]

use oppscore::{AnalysisOrchestrator, MockModel, Observation, RemoteAnalysisClient, Sector};
use std::sync::Arc;
use std::time::Duration;

/// Remote timeout used by the mock-backed orchestrators.
pub const TEST_TIMEOUT: Duration = Duration::from_millis(200);

/// 60-character title, 350-character description, four tags.
pub fn technology_observation() -> Observation {
    let title = format!("{:<60}", "Plataforma de inteligencia artificial para pymes");
    let lead = "Asistente de inteligencia artificial que automatiza la facturación ";
    let description = format!("{:x<350}", lead);
    Observation::new(title, description, Sector::Tecnologia)
        .with_id("tech-1")
        .with_tags(["IA", "Software", "Cloud", "Datos"])
}

pub fn critical_health_observation() -> Observation {
    Observation::new(
        "Saturación de urgencias",
        "Estado crítico en hospitales: cada emergencia espera horas sin atención",
        Sector::Salud,
    )
    .with_id("salud-1")
    .with_impact(oppscore::ImpactLevel::MuyAlto)
    .with_urgency(oppscore::UrgencyLevel::Critica)
}

pub fn minor_observation() -> Observation {
    Observation::new(
        "Detalle de la tienda",
        "Un problema menor y pequeño en la decoración",
        Sector::Comercio,
    )
    .with_id("menor-1")
    .with_impact(oppscore::ImpactLevel::Bajo)
    .with_urgency(oppscore::UrgencyLevel::Baja)
}

/// Minimal valid remote payload.
pub fn minimal_payload(score: u8) -> String {
    format!(
        r#"{{"potentialScore": {}, "recommendation": "Validar con clientes"}}"#,
        score
    )
}

pub fn orchestrator_with(model: Arc<MockModel>) -> AnalysisOrchestrator {
    AnalysisOrchestrator::new().with_remote(RemoteAnalysisClient::new(model, TEST_TIMEOUT))
}

/// Client against the real endpoint, configured from `OPPSCORE_API_KEY`.
#[cfg(feature = "real_llm")]
pub fn live_client() -> Option<RemoteAnalysisClient> {
    let key = std::env::var("OPPSCORE_API_KEY").ok()?;
    RemoteAnalysisClient::from_config(&oppscore::RemoteConfig::new(key)).ok()
}
