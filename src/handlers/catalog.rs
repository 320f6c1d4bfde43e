// src/handlers/catalog.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::i18n::Locale,
    models::catalog::DocumentType,
};

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentTypePayload {
    #[validate(length(min = 1, message = "O nome do tipo de documento é obrigatório."))]
    pub name: String,

    pub local_name: Option<String>,

    #[validate(length(min = 1, message = "A categoria é obrigatória."))]
    pub category: String,

    #[validate(range(min = 1, message = "O custo base deve ser de pelo menos 1 crédito."))]
    pub base_credit_cost: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetActivePayload {
    pub is_active: bool,
}

// Visão pública do catálogo: nome já resolvido para o idioma do cliente.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTypeListing {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub base_credit_cost: i64,
}

// ---
// Handlers
// ---

#[utoipa::path(
    post,
    path = "/api/document-types",
    tag = "Catalog",
    request_body = CreateDocumentTypePayload,
    responses(
        (status = 201, description = "Tipo de documento criado", body = DocumentType),
        (status = 400, description = "Payload inválido"),
    ),
    security(("provider_key" = []))
)]
pub async fn create_document_type(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateDocumentTypePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let doc_type = app_state
        .catalog_service
        .create_document_type(
            &payload.name,
            payload.local_name.as_deref(),
            &payload.category,
            payload.base_credit_cost,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(doc_type)))
}

#[utoipa::path(
    get,
    path = "/api/document-types",
    tag = "Catalog",
    responses((status = 200, description = "Tipos ativos, em ordem estável por nome", body = Vec<DocumentTypeListing>)),
    security(("provider_key" = []))
)]
pub async fn list_document_types(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, AppError> {
    let doc_types = app_state.catalog_service.list_active().await?;

    let listing: Vec<DocumentTypeListing> = doc_types
        .iter()
        .map(|t| DocumentTypeListing {
            id: t.id,
            name: t.display_name(&locale.0).to_string(),
            category: t.category.clone(),
            base_credit_cost: t.base_credit_cost,
        })
        .collect();

    Ok(Json(listing))
}

#[utoipa::path(
    get,
    path = "/api/document-types/all",
    tag = "Catalog",
    responses((status = 200, description = "Todos os tipos, inclusive inativos", body = Vec<DocumentType>)),
    security(("provider_key" = []))
)]
pub async fn list_all_document_types(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let doc_types = app_state.catalog_service.list_all().await?;
    Ok(Json(doc_types))
}

#[utoipa::path(
    get,
    path = "/api/document-types/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "Id do tipo de documento")),
    responses(
        (status = 200, body = DocumentType),
        (status = 404, description = "Tipo não encontrado ou inativo"),
    ),
    security(("provider_key" = []))
)]
pub async fn get_document_type(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let doc_type = app_state.catalog_service.get_document_type(id).await?;
    Ok(Json(doc_type))
}

#[utoipa::path(
    patch,
    path = "/api/document-types/{id}/active",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "Id do tipo de documento")),
    request_body = SetActivePayload,
    responses(
        (status = 200, description = "Visibilidade atualizada", body = DocumentType),
        (status = 404, description = "Tipo não encontrado"),
    ),
    security(("provider_key" = []))
)]
pub async fn set_document_type_active(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetActivePayload>,
) -> Result<impl IntoResponse, AppError> {
    let doc_type = app_state
        .catalog_service
        .set_active(id, payload.is_active)
        .await?;

    Ok(Json(doc_type))
}
