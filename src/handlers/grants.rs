// src/handlers/grants.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::ledger::{ConsumptionEvent, PermissionGrant},
};

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GrantDocumentPayload {
    // Se presente, sobrescreve o custo base do catálogo para esta escola.
    #[validate(range(min = 1, message = "O custo por uso deve ser de pelo menos 1 crédito."))]
    pub credits_per_use: Option<i64>,

    #[validate(length(min = 1, message = "A identidade do admin é obrigatória."))]
    pub granted_by: String,

    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkPermissionsPayload {
    #[validate(length(min = 1, message = "Informe pelo menos um tipo de documento."))]
    pub document_type_ids: Vec<Uuid>,

    #[validate(range(min = 1, message = "O custo por uso deve ser de pelo menos 1 crédito."))]
    pub credits_per_use: Option<i64>,

    #[validate(length(min = 1, message = "A identidade do admin é obrigatória."))]
    pub granted_by: String,
}

// ---
// Handlers
// ---

#[utoipa::path(
    post,
    path = "/api/schools/{id}/grant-document/{document_type_id}",
    tag = "Grants",
    params(
        ("id" = Uuid, Path, description = "Id da escola"),
        ("document_type_id" = Uuid, Path, description = "Id do tipo de documento"),
    ),
    request_body = GrantDocumentPayload,
    responses(
        (status = 200, description = "Concessão criada ou atualizada (upsert)", body = PermissionGrant),
        (status = 404, description = "Escola ou tipo de documento não encontrado"),
        (status = 409, description = "Tenant inativo"),
    ),
    security(("provider_key" = []))
)]
pub async fn grant_document(
    State(app_state): State<AppState>,
    Path((id, document_type_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<GrantDocumentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let grant = app_state
        .ledger_service
        .grant_permission(
            id,
            document_type_id,
            payload.credits_per_use,
            &payload.granted_by,
            payload.notes.as_deref(),
        )
        .await?;

    Ok(Json(grant))
}

#[utoipa::path(
    delete,
    path = "/api/schools/{id}/revoke-document/{document_type_id}",
    tag = "Grants",
    params(
        ("id" = Uuid, Path, description = "Id da escola"),
        ("document_type_id" = Uuid, Path, description = "Id do tipo de documento"),
    ),
    responses(
        (status = 204, description = "Concessão revogada"),
        (status = 404, description = "Nenhuma concessão registrada para o par"),
    ),
    security(("provider_key" = []))
)]
pub async fn revoke_document(
    State(app_state): State<AppState>,
    Path((id, document_type_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .ledger_service
        .revoke_permission(id, document_type_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/schools/{id}/bulk-permissions",
    tag = "Grants",
    params(("id" = Uuid, Path, description = "Id da escola")),
    request_body = BulkPermissionsPayload,
    responses(
        (status = 200, description = "Todas as concessões aplicadas", body = Vec<PermissionGrant>),
        (status = 404, description = "Algum tipo de documento é inválido: NADA foi aplicado"),
    ),
    security(("provider_key" = []))
)]
pub async fn bulk_permissions(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<BulkPermissionsPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let grants = app_state
        .ledger_service
        .bulk_grant(
            id,
            &payload.document_type_ids,
            payload.credits_per_use,
            &payload.granted_by,
        )
        .await?;

    Ok(Json(grants))
}

#[utoipa::path(
    get,
    path = "/api/schools/{id}/grants",
    tag = "Grants",
    params(("id" = Uuid, Path, description = "Id da escola")),
    responses((status = 200, body = Vec<PermissionGrant>)),
    security(("provider_key" = []))
)]
pub async fn list_school_grants(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let grants = app_state.ledger_service.list_grants(id).await?;
    Ok(Json(grants))
}

// A geração de documentos chama este endpoint ANTES de renderizar e
// aborta se ele falhar. O evento devolvido inclui o saldo restante.
#[utoipa::path(
    post,
    path = "/api/schools/{id}/consume/{document_type_id}",
    tag = "Ledger",
    params(
        ("id" = Uuid, Path, description = "Id da escola"),
        ("document_type_id" = Uuid, Path, description = "Id do tipo de documento"),
    ),
    responses(
        (status = 201, description = "Crédito debitado e evento registrado", body = ConsumptionEvent),
        (status = 409, description = "Sem concessão ativa, tenant inativo ou créditos insuficientes"),
    ),
    security(("provider_key" = []))
)]
pub async fn consume_document(
    State(app_state): State<AppState>,
    Path((id, document_type_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let event = app_state
        .ledger_service
        .consume(id, document_type_id)
        .await?;

    Ok((StatusCode::CREATED, Json(event)))
}

#[utoipa::path(
    get,
    path = "/api/schools/{id}/consumption-events",
    tag = "Ledger",
    params(("id" = Uuid, Path, description = "Id da escola")),
    responses((status = 200, description = "Eventos de consumo, mais recentes primeiro", body = Vec<ConsumptionEvent>)),
    security(("provider_key" = []))
)]
pub async fn list_consumption_events(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let events = app_state.ledger_service.list_consumption_events(id).await?;
    Ok(Json(events))
}
