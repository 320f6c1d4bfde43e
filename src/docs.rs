// src/docs.rs

use axum::Json;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Schools (Tenancy) ---
        handlers::schools::create_school,
        handlers::schools::list_schools,
        handlers::schools::get_school,
        handlers::schools::top_up_credits,
        handlers::schools::set_school_status,

        // --- Catalog ---
        handlers::catalog::create_document_type,
        handlers::catalog::list_document_types,
        handlers::catalog::list_all_document_types,
        handlers::catalog::get_document_type,
        handlers::catalog::set_document_type_active,

        // --- Grants & Ledger ---
        handlers::grants::grant_document,
        handlers::grants::revoke_document,
        handlers::grants::bulk_permissions,
        handlers::grants::list_school_grants,
        handlers::grants::consume_document,
        handlers::grants::list_consumption_events,
    ),
    components(
        schemas(
            // --- Schools ---
            models::school::SchoolPlan,
            models::school::SchoolStatus,
            models::school::School,
            handlers::schools::CreateSchoolPayload,
            handlers::schools::TopUpCreditsPayload,
            handlers::schools::SetStatusPayload,

            // --- Catalog ---
            models::catalog::DocumentType,
            handlers::catalog::CreateDocumentTypePayload,
            handlers::catalog::SetActivePayload,
            handlers::catalog::DocumentTypeListing,

            // --- Grants & Ledger ---
            models::ledger::PermissionGrant,
            models::ledger::ConsumptionEvent,
            handlers::grants::GrantDocumentPayload,
            handlers::grants::BulkPermissionsPayload,
        )
    ),
    tags(
        (name = "Schools", description = "Diretório de tenants: escolas, planos, status e saldo"),
        (name = "Catalog", description = "Catálogo de tipos de documento e custos"),
        (name = "Grants", description = "Concessão e revogação de permissões por escola"),
        (name = "Ledger", description = "Consumo de créditos e trilha de auditoria")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "provider_key",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-Provider-Key"))),
        );
    }
}

/// Servimos o documento como JSON puro; a UI fica por conta do cliente.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
