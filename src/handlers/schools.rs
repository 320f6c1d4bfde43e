// src/handlers/schools.rs

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
    models::school::{School, SchoolPlan, SchoolStatus},
};

// ---
// Payloads (os "formulários" da API)
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSchoolPayload {
    #[validate(length(min = 1, message = "O nome da escola é obrigatório."))]
    pub name: String,

    #[validate(email(message = "O e-mail de contato é inválido."))]
    pub contact_email: String,

    // Se omitido, a escola nasce no plano básico.
    #[serde(default)]
    pub plan: Option<SchoolPlan>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopUpCreditsPayload {
    // Pela API só entra recarga positiva; o débito acontece no consumo.
    #[validate(range(min = 1, message = "A recarga deve ser de pelo menos 1 crédito."))]
    pub amount: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetStatusPayload {
    pub status: SchoolStatus,
}

// ---
// Handlers
// ---

#[utoipa::path(
    post,
    path = "/api/schools",
    tag = "Schools",
    request_body = CreateSchoolPayload,
    responses(
        (status = 201, description = "Escola registrada", body = School),
        (status = 400, description = "Payload inválido"),
    ),
    security(("provider_key" = []))
)]
pub async fn create_school(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateSchoolPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let school = app_state
        .school_service
        .create_school(
            &payload.name,
            &payload.contact_email,
            payload.plan.unwrap_or(SchoolPlan::Basic),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(school)))
}

#[utoipa::path(
    get,
    path = "/api/schools",
    tag = "Schools",
    responses((status = 200, body = Vec<School>)),
    security(("provider_key" = []))
)]
pub async fn list_schools(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let schools = app_state.school_service.list_schools().await?;
    Ok(Json(schools))
}

#[utoipa::path(
    get,
    path = "/api/schools/{id}",
    tag = "Schools",
    params(("id" = Uuid, Path, description = "Id da escola")),
    responses(
        (status = 200, body = School),
        (status = 404, description = "Escola não encontrada"),
    ),
    security(("provider_key" = []))
)]
pub async fn get_school(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let school = app_state.school_service.get_school(id).await?;
    Ok(Json(school))
}

#[utoipa::path(
    post,
    path = "/api/schools/{id}/credits",
    tag = "Schools",
    params(("id" = Uuid, Path, description = "Id da escola")),
    request_body = TopUpCreditsPayload,
    responses(
        (status = 200, description = "Saldo atualizado", body = School),
        (status = 404, description = "Escola não encontrada"),
    ),
    security(("provider_key" = []))
)]
pub async fn top_up_credits(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TopUpCreditsPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let school = app_state
        .school_service
        .adjust_credits(id, payload.amount)
        .await?;

    Ok(Json(school))
}

#[utoipa::path(
    patch,
    path = "/api/schools/{id}/status",
    tag = "Schools",
    params(("id" = Uuid, Path, description = "Id da escola")),
    request_body = SetStatusPayload,
    responses(
        (status = 200, description = "Status atualizado", body = School),
        (status = 409, description = "Transição inválida"),
    ),
    security(("provider_key" = []))
)]
pub async fn set_school_status(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let school = app_state
        .school_service
        .set_status(id, payload.status)
        .await?;

    Ok(Json(school))
}
