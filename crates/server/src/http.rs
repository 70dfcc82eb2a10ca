//! HTTP Endpoints
//!
//! REST API for the screening service:
//! - `POST /api/analyze` - analyze typed text
//! - `POST /api/analyze/audio` - transcribe base64 audio, then analyze
//! - `GET /api/languages` - supported languages
//! - `GET /health` - configuration status summary

use std::time::{Duration, Instant};

use axum::{
    extract::{DefaultBodyLimit, Json, State},
    http::{header, HeaderValue, Method, StatusCode},
    routing::{get, post},
    Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use mindcare_config::ScreeningValidator;
use mindcare_core::{AnalysisResult, AudioFormat, AudioInput, Language, ScreeningError};
use mindcare_pipeline::ScreeningPipeline;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let server = &state.settings.server;
    let cors_layer = build_cors_layer(&server.cors_origins, server.cors_enabled);
    let timeout = Duration::from_secs(server.timeout_seconds);
    // Base64 inflates audio by 4/3; leave headroom for the JSON envelope
    let body_limit = server.max_audio_bytes * 4 / 3 + 8 * 1024;

    Router::new()
        .route("/api/analyze", post(analyze))
        .route("/api/analyze/audio", post(analyze_audio))
        .route("/api/languages", get(list_languages))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(timeout))
        .layer(CompressionLayer::new())
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// - If cors_enabled is false, returns permissive layer (for dev)
/// - If cors_origins is empty, defaults to localhost:3000 for safety
/// - Otherwise, uses the configured origins
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        // CORS disabled - allow all (only for development!)
        tracing::warn!("CORS is disabled - allowing all origins (NOT FOR PRODUCTION)");
        return CorsLayer::permissive();
    }

    if origins.is_empty() {
        // No origins configured - default to localhost for safety
        tracing::info!("No CORS origins configured, defaulting to localhost:3000");
        return CorsLayer::new()
            .allow_origin("http://localhost:3000".parse::<HeaderValue>().unwrap())
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);
    }

    // Parse configured origins
    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    if parsed_origins.is_empty() {
        tracing::error!("All configured CORS origins are invalid, falling back to localhost");
        return CorsLayer::new()
            .allow_origin("http://localhost:3000".parse::<HeaderValue>().unwrap())
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Text analysis request
#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    text: String,
}

/// Audio analysis request
#[derive(Debug, Deserialize)]
struct AnalyzeAudioRequest {
    /// Base64 encoded audio data
    audio: String,
    /// Audio format (wav, mp3, m4a)
    audio_format: String,
}

/// Per-phase timing in milliseconds
#[derive(Debug, Serialize, Default)]
struct ScreeningMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    stt_ms: Option<u64>,
    analysis_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    tts_ms: Option<u64>,
    total_ms: u64,
}

/// Analysis response: the result fields plus timing metrics
#[derive(Debug, Serialize)]
struct AnalyzeResponse {
    #[serde(flatten)]
    result: AnalysisResult,
    /// Raw transcript, on audio requests only
    #[serde(skip_serializing_if = "Option::is_none")]
    transcript: Option<String>,
    /// Base64 encoded spoken reply, when a synthesis engine is attached
    #[serde(skip_serializing_if = "Option::is_none")]
    audio_response: Option<String>,
    /// Content type of `audio_response`
    #[serde(skip_serializing_if = "Option::is_none")]
    audio_mime_type: Option<String>,
    metrics: ScreeningMetrics,
}

/// Inlined spoken reply, empty when synthesis is off or failed
#[derive(Debug, Default)]
struct RenderedSpeech {
    audio: Option<String>,
    mime_type: Option<String>,
    tts_ms: Option<u64>,
}

/// Synthesize the spoken reply and inline it as base64
///
/// The analysis is already complete here, so a synthesis failure
/// degrades to a text-only response instead of failing the request.
/// The temp file written by the engine is removed once encoded.
async fn render_reply_speech(pipeline: &ScreeningPipeline, result: &AnalysisResult) -> RenderedSpeech {
    let start = Instant::now();

    let handle = match pipeline.render_speech(result).await {
        Ok(Some(handle)) => handle,
        Ok(None) => return RenderedSpeech::default(),
        Err(e) => {
            tracing::warn!("Reply synthesis failed, returning text only: {}", e);
            return RenderedSpeech::default();
        }
    };

    let audio = match tokio::fs::read(&handle.path).await {
        Ok(bytes) => Some(BASE64.encode(bytes)),
        Err(e) => {
            tracing::warn!(
                path = %handle.path.display(),
                "Failed to read synthesized audio, returning text only: {}", e
            );
            None
        }
    };
    let _ = tokio::fs::remove_file(&handle.path).await;

    RenderedSpeech {
        mime_type: audio.as_ref().map(|_| handle.mime_type),
        audio,
        tts_ms: Some(start.elapsed().as_millis() as u64),
    }
}

type ApiRejection = (StatusCode, Json<serde_json::Value>);

/// Map a pipeline error onto an HTTP status and JSON error body
fn error_response(err: ScreeningError) -> ApiRejection {
    let status = match &err {
        ScreeningError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        ScreeningError::Transcription(_)
        | ScreeningError::LanguageId(_)
        | ScreeningError::Synthesis(_) => StatusCode::BAD_GATEWAY,
    };

    if status.is_server_error() {
        tracing::error!("Analysis error: {}", err);
    }

    (status, Json(serde_json::json!({ "error": err.to_string() })))
}

/// Analyze typed text
async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiRejection> {
    let start = Instant::now();

    let result = state
        .pipeline
        .analyze(&request.text)
        .await
        .map_err(error_response)?;
    let analysis_ms = start.elapsed().as_millis() as u64;

    let speech = render_reply_speech(&state.pipeline, &result).await;

    Ok(Json(AnalyzeResponse {
        result,
        transcript: None,
        audio_response: speech.audio,
        audio_mime_type: speech.mime_type,
        metrics: ScreeningMetrics {
            stt_ms: None,
            analysis_ms,
            tts_ms: speech.tts_ms,
            total_ms: start.elapsed().as_millis() as u64,
        },
    }))
}

/// Analyze uploaded audio
async fn analyze_audio(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeAudioRequest>,
) -> Result<Json<AnalyzeResponse>, ApiRejection> {
    let start = Instant::now();

    tracing::info!(
        audio_format = %request.audio_format,
        encoded_len = request.audio.len(),
        "Audio analysis request"
    );

    let audio = decode_audio(
        &request.audio,
        &request.audio_format,
        state.settings.server.max_audio_bytes,
    )
    .map_err(|(status, message)| (status, Json(serde_json::json!({ "error": message }))))?;

    let stt_start = Instant::now();
    let transcript = state
        .pipeline
        .transcribe(&audio)
        .await
        .map_err(error_response)?;
    let stt_ms = stt_start.elapsed().as_millis() as u64;

    let analysis_start = Instant::now();
    let result = state
        .pipeline
        .analyze(&transcript.text)
        .await
        .map_err(error_response)?;
    let analysis_ms = analysis_start.elapsed().as_millis() as u64;

    let speech = render_reply_speech(&state.pipeline, &result).await;

    Ok(Json(AnalyzeResponse {
        result,
        transcript: Some(transcript.text),
        audio_response: speech.audio,
        audio_mime_type: speech.mime_type,
        metrics: ScreeningMetrics {
            stt_ms: Some(stt_ms),
            analysis_ms,
            tts_ms: speech.tts_ms,
            total_ms: start.elapsed().as_millis() as u64,
        },
    }))
}

/// Decode and bound a base64 audio payload
fn decode_audio(
    audio_b64: &str,
    format: &str,
    max_bytes: usize,
) -> Result<AudioInput, (StatusCode, String)> {
    let format = AudioFormat::parse(format).ok_or_else(|| {
        let supported = AudioFormat::all()
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        (
            StatusCode::BAD_REQUEST,
            format!(
                "Unsupported audio format '{}' (expected one of: {})",
                format, supported
            ),
        )
    })?;

    let data = BASE64.decode(audio_b64).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            format!("Invalid base64 audio: {}", e),
        )
    })?;

    if data.len() > max_bytes {
        return Err((
            StatusCode::PAYLOAD_TOO_LARGE,
            format!(
                "Audio payload of {} bytes exceeds the {} byte limit",
                data.len(),
                max_bytes
            ),
        ));
    }

    Ok(AudioInput::new(data, format))
}

/// List supported languages
async fn list_languages() -> Json<serde_json::Value> {
    let languages: Vec<serde_json::Value> = Language::all()
        .iter()
        .map(|lang| {
            serde_json::json!({
                "code": lang.code(),
                "name": lang.name(),
                "default": *lang == Language::default(),
            })
        })
        .collect();

    Json(serde_json::json!({ "languages": languages }))
}

/// Health check summarizing the loaded configuration
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let mut checks = serde_json::Map::new();

    let report = ScreeningValidator::new().validate(&state.config);
    let config_ok = report.is_ok();
    checks.insert(
        "screening_config".to_string(),
        serde_json::json!({
            "status": if config_ok { "ok" } else { "invalid" },
            "categories": state.config.scoring.categories.len(),
            "crisis_phrases": state.config.crisis.phrases.len(),
            "languages": state.config.bundles.bundles.len(),
            "summary": report.summary(),
        }),
    );

    checks.insert(
        "speech".to_string(),
        serde_json::json!({
            "status": "ok",
            "stt_attached": state.pipeline.has_speech_to_text(),
            "tts_attached": state.pipeline.has_text_to_speech(),
        }),
    );

    let status = if config_ok { "healthy" } else { "degraded" };
    let status_code = if config_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(serde_json::json!({
            "status": status,
            "version": env!("CARGO_PKG_VERSION"),
            "checks": checks
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use mindcare_config::{ScreeningConfig, Settings};
    use mindcare_core::{AudioHandle, TextToSpeech};
    use tower::ServiceExt;

    #[test]
    fn test_router_creation() {
        let state = AppState::new(Settings::default(), ScreeningConfig::default());
        let _ = create_router(state);
    }

    #[tokio::test]
    async fn test_audio_within_configured_limit_reaches_handler() {
        let state = AppState::new(Settings::default(), ScreeningConfig::default());
        let max_audio_bytes = state.settings.server.max_audio_bytes;
        let app = create_router(state);

        // 3 MiB decoded: inside the configured bound, but over the 2 MB
        // cap axum applies to JSON bodies when no limit is set
        let clip = vec![0u8; 3 * 1024 * 1024];
        assert!(clip.len() <= max_audio_bytes);
        let body = serde_json::json!({
            "audio": BASE64.encode(&clip),
            "audio_format": "wav",
        })
        .to_string();

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/analyze/audio")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        // The body reaches the handler; with no transcription engine
        // attached it answers 502, not a framework-level 413
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(json["error"]
            .as_str()
            .unwrap()
            .starts_with("Transcription failed"));
    }

    #[test]
    fn test_decode_audio_accepts_known_formats() {
        let encoded = BASE64.encode(b"fake audio bytes");
        let audio = decode_audio(&encoded, "wav", 1024).unwrap();
        assert_eq!(audio.format, AudioFormat::Wav);
        assert_eq!(audio.data, b"fake audio bytes");

        assert!(decode_audio(&encoded, "MP3", 1024).is_ok());
        assert!(decode_audio(&encoded, "m4a", 1024).is_ok());
    }

    #[test]
    fn test_decode_audio_rejects_unknown_format() {
        let encoded = BASE64.encode(b"fake audio bytes");
        let (status, message) = decode_audio(&encoded, "ogg", 1024).unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(message.contains("Unsupported audio format"));
    }

    #[test]
    fn test_decode_audio_rejects_bad_base64() {
        let (status, _) = decode_audio("not!!base64@@", "wav", 1024).unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_decode_audio_rejects_oversize_payload() {
        let encoded = BASE64.encode(vec![0u8; 64]);
        let (status, message) = decode_audio(&encoded, "wav", 16).unwrap_err();
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert!(message.contains("exceeds"));
    }

    #[tokio::test]
    async fn test_response_serialization_flattens_result() {
        let state = AppState::new(Settings::default(), ScreeningConfig::default());
        let result = state.pipeline.analyze("exam stress").await.unwrap();

        let response = AnalyzeResponse {
            result,
            transcript: None,
            audio_response: None,
            audio_mime_type: None,
            metrics: ScreeningMetrics {
                stt_ms: None,
                analysis_ms: 2,
                tts_ms: None,
                total_ms: 3,
            },
        };

        let json = serde_json::to_value(&response).unwrap();
        // Result fields sit at the top level next to the metrics
        assert_eq!(json["language"], "en");
        assert_eq!(json["crisis"], false);
        assert_eq!(json["metrics"]["analysis_ms"], 2);
        // Text-only responses carry no audio or transcript keys at all
        assert!(json.get("transcript").is_none());
        assert!(json.get("audio_response").is_none());
        assert!(json.get("audio_mime_type").is_none());
        assert!(json["metrics"].get("stt_ms").is_none());
        assert!(json["metrics"].get("tts_ms").is_none());
    }

    #[tokio::test]
    async fn test_response_serialization_with_audio_fields() {
        let state = AppState::new(Settings::default(), ScreeningConfig::default());
        let result = state.pipeline.analyze("I feel anxious").await.unwrap();

        let response = AnalyzeResponse {
            result,
            transcript: Some("I feel anxious".to_string()),
            audio_response: Some("AQID".to_string()),
            audio_mime_type: Some("audio/mpeg".to_string()),
            metrics: ScreeningMetrics {
                stt_ms: Some(40),
                analysis_ms: 2,
                tts_ms: Some(12),
                total_ms: 60,
            },
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["transcript"], "I feel anxious");
        assert_eq!(json["audio_response"], "AQID");
        assert_eq!(json["audio_mime_type"], "audio/mpeg");
        assert_eq!(json["metrics"]["stt_ms"], 40);
        assert_eq!(json["metrics"]["tts_ms"], 12);
    }

    /// Text-to-speech stub that records where it wrote the audio
    struct StaticTts {
        last_path: Mutex<Option<PathBuf>>,
    }

    #[async_trait]
    impl TextToSpeech for StaticTts {
        async fn synthesize(
            &self,
            _text: &str,
            _language: Language,
        ) -> mindcare_core::Result<AudioHandle> {
            let mut file = tempfile::Builder::new()
                .prefix("mindcare-test-")
                .suffix(".mp3")
                .tempfile()
                .unwrap();
            file.write_all(b"speech bytes").unwrap();
            let (_, path) = file.keep().unwrap();
            *self.last_path.lock().unwrap() = Some(path.clone());
            Ok(AudioHandle {
                path,
                mime_type: "audio/mpeg".to_string(),
            })
        }

        fn model_name(&self) -> &str {
            "static-tts"
        }
    }

    #[tokio::test]
    async fn test_render_reply_speech_without_engine_is_empty() {
        let pipeline = ScreeningPipeline::new(Arc::new(ScreeningConfig::default()));
        let result = pipeline.analyze("I feel fine").await.unwrap();

        let speech = render_reply_speech(&pipeline, &result).await;
        assert!(speech.audio.is_none());
        assert!(speech.mime_type.is_none());
        assert!(speech.tts_ms.is_none());
    }

    #[tokio::test]
    async fn test_render_reply_speech_inlines_audio_and_removes_file() {
        let tts = Arc::new(StaticTts {
            last_path: Mutex::new(None),
        });
        let pipeline = ScreeningPipeline::new(Arc::new(ScreeningConfig::default()))
            .with_text_to_speech(tts.clone());

        let result = pipeline.analyze("exam stress").await.unwrap();
        let speech = render_reply_speech(&pipeline, &result).await;

        let audio = speech.audio.expect("spoken reply should be inlined");
        assert_eq!(BASE64.decode(audio).unwrap(), b"speech bytes");
        assert_eq!(speech.mime_type.as_deref(), Some("audio/mpeg"));
        assert!(speech.tts_ms.is_some());

        // The engine's temp file is removed once the bytes are encoded
        let path = tts.last_path.lock().unwrap().clone().unwrap();
        assert!(!path.exists());
    }
}
