//! HTTP route handlers
//!
//! `POST /message` runs the agent on a text message; `POST /media` first
//! hands the uploaded fridge photo to the analyzer and folds the detected
//! items into the utterance. Agent failures are logged and answered with a
//! generic apology so the serving process never dies on a bad invoke.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::{HeaderValue, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::agent::AgentExecutor;
use crate::core::{answer_text, Config, Result, SousChefError};
use crate::fridge::FridgeAnalyzer;
use crate::llm::GeminiClient;
use crate::tools::ToolRegistry;

const APOLOGY: &str =
    "Sorry, I couldn't come up with an answer just now. Please try again.";

/// Shared server state.
///
/// One executor serves all conversations; the mutex serializes `invoke`
/// calls since an executor is not safe to invoke concurrently.
pub struct AppState {
    agent: Mutex<AgentExecutor>,
    analyzer: FridgeAnalyzer,
}

#[derive(Debug, Deserialize)]
struct MessageRequest {
    message: String,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: String,
}

/// Start the HTTP server
pub async fn serve(config: Config) -> Result<()> {
    let client = GeminiClient::from_config(&config)?;
    let tools = Arc::new(ToolRegistry::with_default_tools(client.clone()));
    let agent = AgentExecutor::new(
        Box::new(client.clone()),
        tools,
        config.agent.max_iterations,
    );
    let analyzer = FridgeAnalyzer::new(client);

    let state = Arc::new(AppState {
        agent: Mutex::new(agent),
        analyzer,
    });

    let origin = config
        .server
        .allowed_origin
        .parse::<HeaderValue>()
        .map_err(|e| SousChefError::config(format!("Invalid allowed_origin: {}", e)))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/message", post(message))
        .route("/media", post(media))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(%addr, "starting server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// POST /message - text-only chat turn
async fn message(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MessageRequest>,
) -> (StatusCode, Json<MessageResponse>) {
    run_agent(&state, &request.message).await
}

/// POST /media - fridge photo plus text
async fn media(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> (StatusCode, Json<MessageResponse>) {
    let mut message = String::new();
    let mut image: Option<(String, Vec<u8>)> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                error!(error = %e, "malformed multipart upload");
                return reply(StatusCode::BAD_REQUEST, APOLOGY);
            }
        };

        match field.name() {
            Some("message") => match field.text().await {
                Ok(text) => message = text,
                Err(e) => {
                    error!(error = %e, "failed to read message field");
                    return reply(StatusCode::BAD_REQUEST, APOLOGY);
                }
            },
            Some("file") => {
                let mime_type = field
                    .content_type()
                    .unwrap_or("image/jpeg")
                    .to_string();
                match field.bytes().await {
                    Ok(bytes) => image = Some((mime_type, bytes.to_vec())),
                    Err(e) => {
                        error!(error = %e, "failed to read image field");
                        return reply(StatusCode::BAD_REQUEST, APOLOGY);
                    }
                }
            }
            _ => {}
        }
    }

    let Some((mime_type, bytes)) = image else {
        return reply(StatusCode::BAD_REQUEST, "No image uploaded.");
    };

    let items = match state.analyzer.analyze(&mime_type, &bytes).await {
        Ok(items) => items,
        Err(e) => {
            error!(error = %e, "fridge analysis failed");
            return reply(StatusCode::UNPROCESSABLE_ENTITY, APOLOGY);
        }
    };

    let utterance = format!("{} (food in the fridge: {})", message, items.join(", "));
    run_agent(&state, &utterance).await
}

/// Run one agent invocation and shape the HTTP reply
async fn run_agent(state: &AppState, utterance: &str) -> (StatusCode, Json<MessageResponse>) {
    let mut agent = state.agent.lock().await;

    match agent.invoke(utterance).await {
        Ok(payload) => reply(StatusCode::OK, &answer_text(&payload)),
        Err(e) => {
            error!(error = %e, "agent invocation failed");
            reply(StatusCode::INTERNAL_SERVER_ERROR, APOLOGY)
        }
    }
}

fn reply(status: StatusCode, message: &str) -> (StatusCode, Json<MessageResponse>) {
    (
        status,
        Json(MessageResponse {
            message: message.to_string(),
        }),
    )
}
