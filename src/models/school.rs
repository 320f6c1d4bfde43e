// src/models/school.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums (gravados como TEXT no banco) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchoolPlan {
    Basic,
    Pro,
    Enterprise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchoolStatus {
    Trial,     // Recém-criada, ainda avaliando
    Active,    // Assinatura em dia
    Suspended, // Bloqueada pelo provedor (inadimplência etc.)
    Expired,   // Encerrada; nunca apagamos a linha
}

impl SchoolStatus {
    /// Tabela de transições permitidas do ciclo de vida do tenant.
    /// Qualquer outra combinação é uma transição inválida.
    pub fn can_transition_to(self, next: SchoolStatus) -> bool {
        use SchoolStatus::*;
        matches!(
            (self, next),
            (Trial, Active) | (Active, Suspended) | (Active, Expired) | (Suspended, Active)
        )
    }

    /// Só tenants em trial ou ativos podem receber concessões e consumir.
    pub fn is_operational(self) -> bool {
        matches!(self, SchoolStatus::Trial | SchoolStatus::Active)
    }
}

// ---
// School (O "Tenant")
// ---
// A conta principal: uma escola cliente da plataforma.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct School {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,

    #[schema(example = "Colégio Dom Pedro II")]
    pub name: String,

    #[schema(example = "secretaria@dompedro.edu.br")]
    pub contact_email: String,

    pub plan: SchoolPlan,
    pub status: SchoolStatus,

    // Saldo de créditos: available = total - used (nunca negativo).
    #[schema(example = 100)]
    pub total_credits: i64,
    #[schema(example = 37)]
    pub used_credits: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl School {
    pub fn available_credits(&self) -> i64 {
        self.total_credits - self.used_credits
    }
}

#[cfg(test)]
mod tests {
    use super::SchoolStatus::*;

    #[test]
    fn transicoes_permitidas() {
        assert!(Trial.can_transition_to(Active));
        assert!(Active.can_transition_to(Suspended));
        assert!(Active.can_transition_to(Expired));
        assert!(Suspended.can_transition_to(Active));
    }

    #[test]
    fn transicoes_proibidas() {
        assert!(!Trial.can_transition_to(Suspended));
        assert!(!Trial.can_transition_to(Expired));
        assert!(!Trial.can_transition_to(Trial));
        assert!(!Suspended.can_transition_to(Expired));
        assert!(!Suspended.can_transition_to(Trial));
        assert!(!Expired.can_transition_to(Active));
        assert!(!Expired.can_transition_to(Trial));
        assert!(!Active.can_transition_to(Trial));
    }

    #[test]
    fn operacional_apenas_trial_e_active() {
        assert!(Trial.is_operational());
        assert!(Active.is_operational());
        assert!(!Suspended.is_operational());
        assert!(!Expired.is_operational());
    }
}
