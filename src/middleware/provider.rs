// src/middleware/provider.rs

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::{common::error::AppError, config::AppState};

// Guarda das rotas administrativas do provedor: compara o header
// X-Provider-Key com a chave configurada. É um portão fino de
// service-to-service, não um sistema de autenticação.
pub async fn provider_guard(
    State(app_state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let header_key = request
        .headers()
        .get("X-Provider-Key")
        .and_then(|value| value.to_str().ok());

    match header_key {
        Some(key) if key == app_state.provider_key => Ok(next.run(request).await),
        _ => Err(AppError::InvalidProviderKey),
    }
}
