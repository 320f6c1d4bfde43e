// src/models/ledger.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// ---
// PermissionGrant (A "Concessão")
// ---
// Uma linha por par (escola, tipo de documento). Estados:
// inexistente -> concedida (grant), concedida -> revogada (revoke),
// revogada -> concedida (re-grant). Conceder de novo atualiza os termos.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionGrant {
    pub school_id: Uuid,
    pub document_type_id: Uuid,

    pub is_allowed: bool,

    // Se presente, sobrescreve o base_credit_cost do catálogo para esta escola.
    #[schema(example = 2)]
    pub credits_per_use: Option<i64>,

    #[schema(example = "admin@provedor.com")]
    pub granted_by: String,
    pub granted_at: DateTime<Utc>,

    pub notes: Option<String>,
}

// ---
// ConsumptionEvent (O "Ledger")
// ---
// Append-only: a trilha de auditoria para disputas de cobrança.
// Nunca editado nem apagado depois de gravado.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionEvent {
    pub id: Uuid,

    pub school_id: Uuid,
    pub document_type_id: Uuid,

    #[schema(example = 3)]
    pub credits_charged: i64,

    // Snapshot do saldo disponível logo após o débito.
    #[schema(example = 7)]
    pub balance_after: i64,

    pub created_at: DateTime<Utc>,
}
