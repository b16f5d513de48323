use crate::state::AppState;
use crate::stream;
use crate::wire;
use alert::AlertEvent;
use axum::{
    Router,
    extract::{
        Multipart, State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::{get, post},
};
use base64::Engine;
use serde::Serialize;
use tokio::sync::broadcast::error::RecvError;
use tower_http::cors::CorsLayer;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/detect", post(detect))
        .route("/ws", get(ws_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

#[derive(Serialize)]
struct DetectResponse {
    label: String,
    confidence: f32,
    /// Annotated frame as a base64 JPEG
    image: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, message: &str) -> axum::response::Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Single uploaded image mode: one detector call, one render.
async fn detect(State(state): State<AppState>, mut multipart: Multipart) -> impl IntoResponse {
    let mut image_bytes = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() == Some("image") {
                    match field.bytes().await {
                        Ok(bytes) => {
                            image_bytes = Some(bytes);
                            break;
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "Failed to read upload body");
                            return error_response(StatusCode::BAD_REQUEST, "Invalid upload");
                        }
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Malformed multipart request");
                return error_response(StatusCode::BAD_REQUEST, "Invalid upload");
            }
        }
    }

    let Some(bytes) = image_bytes else {
        return error_response(StatusCode::BAD_REQUEST, "Missing image field");
    };

    // Decode, inference and alert dispatch are all blocking work
    let result = tokio::task::spawn_blocking(move || process_upload(&state, &bytes)).await;

    match result {
        Ok(Ok(response)) => (StatusCode::OK, Json(response)).into_response(),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Image processing failed");
            error_response(StatusCode::UNPROCESSABLE_ENTITY, "Could not process image")
        }
        Err(e) => {
            tracing::error!(error = %e, "Detection task failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
        }
    }
}

fn process_upload(state: &AppState, bytes: &[u8]) -> anyhow::Result<DetectResponse> {
    let img = image::load_from_memory(bytes)?.to_rgb8();
    let (width, height) = img.dimensions();

    let result = state
        .detector
        .lock()
        .map_err(|_| anyhow::anyhow!("detector lock poisoned"))?
        .detect(img.as_raw(), width, height)?;

    if result.detection.label.is_danger() {
        let event = AlertEvent {
            label: result.detection.label.as_str().to_string(),
            confidence: result.detection.confidence,
        };
        state
            .dispatcher
            .lock()
            .map_err(|_| anyhow::anyhow!("dispatcher lock poisoned"))?
            .dispatch(&event);
    }

    let jpeg = wire::rgb_to_jpeg(&result.annotated)?;

    Ok(DetectResponse {
        label: result.detection.label.as_str().to_string(),
        confidence: result.detection.confidence,
        image: base64::engine::general_purpose::STANDARD.encode(jpeg),
    })
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Live webcam mode: the first connection starts the capture loop, every
/// connection receives the broadcast frames.
async fn handle_socket(mut socket: WebSocket, state: AppState) {
    tracing::info!("New WebSocket connection");

    stream::ensure_started(state.clone());
    let mut rx = state.tx.subscribe();

    loop {
        let packet = match rx.recv().await {
            Ok(packet) => packet,
            Err(RecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "Client lagging, dropping frames");
                continue;
            }
            Err(RecvError::Closed) => break,
        };

        let message = match wire::encode_packet(&packet) {
            Ok(message) => message,
            Err(e) => {
                tracing::error!(error = %e, "Packet encoding failed");
                continue;
            }
        };

        if socket.send(Message::Binary(message)).await.is_err() {
            tracing::info!("Client disconnected");
            break;
        }
    }
}
