//! Screening Server Entry Point
//!
//! Loads settings and the screening configuration, validates the
//! calibration before binding, and serves the HTTP API with graceful
//! shutdown.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use mindcare_config::{
    load_settings, ConfigError, ScreeningConfig, ScreeningValidator, Settings, ValidationSeverity,
};
use mindcare_pipeline::{
    HttpSttConfig, HttpSttEngine, HttpTtsConfig, HttpTtsEngine, ScreeningPipeline,
};
use mindcare_server::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Priority: env vars > config/{env}.yaml > config/default.yaml > defaults
    let env = std::env::var("MINDCARE_ENV").ok();
    let settings = match load_settings(env.as_deref()) {
        Ok(settings) => {
            // Tracing not yet initialized, use eprintln for early logging
            eprintln!(
                "Loaded configuration from files (env: {})",
                env.as_deref().unwrap_or("default")
            );
            settings
        }
        Err(e) => {
            eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
            Settings::default()
        }
    };

    init_tracing(&settings);

    tracing::info!("Starting screening server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        environment = ?settings.environment,
        config_path = env.as_deref().unwrap_or("default"),
        "Configuration loaded"
    );

    let screening_config = load_screening_config(&settings);
    tracing::info!(
        categories = screening_config.scoring.categories.len(),
        crisis_phrases = screening_config.crisis.phrases.len(),
        languages = screening_config.bundles.bundles.len(),
        default_language = %screening_config.default_language,
        "Screening configuration ready"
    );

    let pipeline = build_pipeline(&settings, screening_config.clone()).await;
    if !pipeline.has_speech_to_text() {
        tracing::info!("No speech-to-text engine attached, audio requests will be rejected");
    }
    if !pipeline.has_text_to_speech() {
        tracing::info!("No text-to-speech engine attached, responses will be text-only");
    }

    let state = AppState::with_pipeline(settings.clone(), screening_config, pipeline);
    let app = create_router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    // Graceful shutdown on SIGTERM/SIGINT
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}

/// Build the screening pipeline, attaching any configured speech engines
///
/// An unreachable sidecar is not fatal at startup: the engine is still
/// attached and each request retries, so a sidecar that comes up later
/// starts serving without a restart.
async fn build_pipeline(settings: &Settings, config: Arc<ScreeningConfig>) -> ScreeningPipeline {
    let mut pipeline = ScreeningPipeline::new(config);
    let timeout = Duration::from_secs(settings.speech.timeout_seconds);

    if let Some(endpoint) = &settings.speech.stt_endpoint {
        match HttpSttEngine::new(HttpSttConfig {
            endpoint: endpoint.clone(),
            timeout,
            ..Default::default()
        }) {
            Ok(engine) => {
                if engine.is_available().await {
                    tracing::info!(endpoint = %endpoint, "Transcription service connected");
                } else {
                    tracing::warn!(
                        endpoint = %endpoint,
                        "Transcription service not reachable, will retry on first request"
                    );
                }
                pipeline = pipeline.with_speech_to_text(Arc::new(engine));
            }
            Err(e) => {
                tracing::warn!("Failed to set up transcription engine: {}. Continuing without.", e);
            }
        }
    }

    if let Some(endpoint) = &settings.speech.tts_endpoint {
        match HttpTtsEngine::new(HttpTtsConfig {
            endpoint: endpoint.clone(),
            timeout,
            ..Default::default()
        }) {
            Ok(engine) => {
                if engine.is_available().await {
                    tracing::info!(endpoint = %endpoint, "Synthesis service connected");
                } else {
                    tracing::warn!(
                        endpoint = %endpoint,
                        "Synthesis service not reachable, will retry on first request"
                    );
                }
                pipeline = pipeline.with_text_to_speech(Arc::new(engine));
            }
            Err(e) => {
                tracing::warn!("Failed to set up synthesis engine: {}. Continuing without.", e);
            }
        }
    }

    pipeline
}

/// Initialize tracing (env filter overrides the configured level)
fn init_tracing(settings: &Settings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &settings.observability.log_level;
        format!("{},tower_http=debug", level).into()
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);
    let fmt_layer = if settings.observability.log_json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };
    subscriber.with(fmt_layer).init();
}

/// Load the screening configuration and gate startup on validation
///
/// A missing file selects the built-in calibration. A present but
/// unparseable file, or a configuration with critical findings, aborts
/// startup so a broken calibration never serves traffic.
fn load_screening_config(settings: &Settings) -> Arc<ScreeningConfig> {
    let path = &settings.screening_config_path;

    let config = match ScreeningConfig::load(path) {
        Ok(config) => {
            tracing::info!(path = %path, "Loaded screening configuration file");
            config
        }
        Err(ConfigError::FileNotFound(_)) => {
            tracing::info!(
                path = %path,
                "No screening configuration file, using built-in defaults"
            );
            ScreeningConfig::default()
        }
        Err(e) => {
            tracing::error!(path = %path, error = %e, "Failed to load screening configuration");
            std::process::exit(1);
        }
    };

    let report = ScreeningValidator::new().validate(&config);
    for finding in &report.findings {
        match finding.severity {
            ValidationSeverity::Warning => {
                tracing::warn!(field = %finding.field, "Config warning: {}", finding.message);
            }
            ValidationSeverity::Error => {
                tracing::error!(field = %finding.field, "Config error: {}", finding.message);
            }
            ValidationSeverity::Critical => {
                tracing::error!(
                    field = %finding.field,
                    "Critical config error: {}", finding.message
                );
            }
        }
    }

    if !report.is_ok() {
        tracing::error!(
            findings = report.findings.len(),
            "Screening configuration validation failed. Fix the above errors and restart."
        );
        std::process::exit(1);
    }

    Arc::new(config)
}
