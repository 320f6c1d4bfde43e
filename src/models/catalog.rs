// src/models/catalog.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// O "cardápio" de documentos que o provedor oferece às escolas.
// Tipos inativos continuam visíveis para o admin (reativação),
// mas somem da listagem pública e não podem ser concedidos nem consumidos.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentType {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440001")]
    pub id: Uuid,

    #[schema(example = "Enrollment Certificate")]
    pub name: String,

    // Nome localizado para exibição (ex: "Declaração de Matrícula")
    pub local_name: Option<String>,

    #[schema(example = "certificates")]
    pub category: String,

    // Custo padrão em créditos; a concessão pode sobrescrever por escola.
    #[schema(example = 3)]
    pub base_credit_cost: i64,

    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl DocumentType {
    /// Nome de exibição conforme o idioma do cliente (Accept-Language).
    pub fn display_name(&self, lang: &str) -> &str {
        if lang != "en" {
            if let Some(local) = &self.local_name {
                return local;
            }
        }
        &self.name
    }
}
