//! oppscore CLI: score and classify business opportunities.
//!
//! Usage:
//!   oppscore analyze --title T --description D --sector S [--tag X]... [--local-only]
//!   oppscore classify --title T --description D --sector S --impact I --urgency U
//!   oppscore sectors

use clap::{Parser, Subcommand};
use oppscore::analysis::tables;
use oppscore::{
    AnalysisOrchestrator, ClassificationEngine, EngineConfig, ImpactLevel, Observation, Sector,
    UrgencyLevel,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const API_KEY_ENV: &str = "OPPSCORE_API_KEY";

#[derive(Parser)]
#[command(
    name = "oppscore",
    version,
    about = "Opportunity scoring and classification engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze an observation and print the result as JSON
    Analyze {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Sector name, e.g. "Tecnología" or "salud"
        #[arg(long, value_parser = parse_sector)]
        sector: Sector,
        #[arg(long)]
        subcategory: Option<String>,
        /// Tag, repeatable
        #[arg(long = "tag")]
        tags: Vec<String>,
        #[arg(long)]
        impact: Option<ImpactLevel>,
        #[arg(long)]
        urgency: Option<UrgencyLevel>,
        /// Skip the remote model entirely
        #[arg(long)]
        local_only: bool,
        /// Path to YAML config (default: <config dir>/oppscore/config.yaml)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Classify an observation with explicit impact and urgency
    Classify {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long, value_parser = parse_sector)]
        sector: Sector,
        #[arg(long)]
        impact: ImpactLevel,
        #[arg(long)]
        urgency: UrgencyLevel,
        #[arg(long)]
        subcategory: Option<String>,
    },
    /// List known sectors with their scoring data
    Sectors,
}

fn parse_sector(s: &str) -> Result<Sector, String> {
    Ok(Sector::parse(s))
}

/// Get the default config path (~/.config/oppscore/config.yaml)
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("oppscore").join("config.yaml"))
}

fn load_config(explicit: Option<PathBuf>) -> Result<EngineConfig, String> {
    let mut config = match explicit {
        Some(path) => EngineConfig::load(&path)
            .map_err(|e| format!("failed to load {}: {}", path.display(), e))?,
        None => match default_config_path().filter(|p| p.exists()) {
            Some(path) => EngineConfig::load(&path)
                .map_err(|e| format!("failed to load {}: {}", path.display(), e))?,
            None => EngineConfig::default(),
        },
    };

    if let Ok(key) = std::env::var(API_KEY_ENV) {
        if !key.trim().is_empty() {
            config.remote.api_key = key;
        }
    }
    Ok(config)
}

fn print_json<T: serde::Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_analyze(observation: Observation, local_only: bool, config: Option<PathBuf>) -> i32 {
    let mut config = match load_config(config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    if local_only {
        config.enable_remote = false;
    }

    let orchestrator = match AnalysisOrchestrator::from_config(&config) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("failed to create tokio runtime: {}", e);
            return 1;
        }
    };

    match rt.block_on(orchestrator.analyze(&observation)) {
        Ok(result) => print_json(&result),
        Err(e) => {
            eprintln!("Error: {}", e);
            2
        }
    }
}

fn cmd_classify(
    title: &str,
    description: &str,
    sector: Sector,
    impact: ImpactLevel,
    urgency: UrgencyLevel,
    subcategory: Option<&str>,
) -> i32 {
    if title.trim().is_empty() || description.trim().is_empty() {
        eprintln!("Error: title and description must not be empty");
        return 2;
    }
    let classification = ClassificationEngine::new().classify(
        title,
        description,
        impact,
        urgency,
        sector,
        subcategory,
    );
    print_json(&classification)
}

fn cmd_sectors() -> i32 {
    println!(
        "{:<18} {:>6} {:>12} {:>10} {:>11}  {}",
        "SECTOR", "WEIGHT", "COMPETITION", "GROWTH %", "SATURATION", "TREND"
    );
    for sector in Sector::ALL {
        let profile = tables::profile(sector);
        println!(
            "{:<18} {:>6} {:>12} {:>10.1} {:>11.2}  {}",
            sector.as_str(),
            profile.weight,
            profile.competition,
            profile.market.growth_pct,
            profile.market.saturation,
            profile.trend.trend
        );
    }
    0
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("oppscore=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let code = match cli.command {
        Commands::Analyze {
            title,
            description,
            sector,
            subcategory,
            tags,
            impact,
            urgency,
            local_only,
            config,
        } => {
            let mut observation = Observation::new(title, description, sector).with_tags(tags);
            observation.subcategory = subcategory;
            observation.impact = impact;
            observation.urgency = urgency;
            cmd_analyze(observation, local_only, config)
        }
        Commands::Classify {
            title,
            description,
            sector,
            impact,
            urgency,
            subcategory,
        } => cmd_classify(
            &title,
            &description,
            sector,
            impact,
            urgency,
            subcategory.as_deref(),
        ),
        Commands::Sectors => cmd_sectors(),
    };
    std::process::exit(code);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_config_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "enable_remote: false\n").unwrap();

        let config = load_config(Some(path)).unwrap();
        assert!(!config.enable_remote);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let err = load_config(Some(PathBuf::from("/nonexistent/oppscore.yaml")))
            .unwrap_err();
        assert!(err.contains("/nonexistent/oppscore.yaml"));
    }

    #[test]
    fn sector_argument_is_lenient() {
        assert_eq!(parse_sector("tecnologia"), Ok(Sector::Tecnologia));
        assert_eq!(parse_sector("desconocido"), Ok(Sector::Otro));
    }

    #[test]
    fn cli_parses_repeated_tags() {
        let cli = Cli::try_parse_from([
            "oppscore",
            "analyze",
            "--title",
            "T",
            "--description",
            "D",
            "--sector",
            "Salud",
            "--tag",
            "a",
            "--tag",
            "b",
            "--impact",
            "Muy Alto",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze { tags, impact, .. } => {
                assert_eq!(tags, vec!["a", "b"]);
                assert_eq!(impact, Some(ImpactLevel::MuyAlto));
            }
            _ => panic!("expected analyze"),
        }
    }
}
