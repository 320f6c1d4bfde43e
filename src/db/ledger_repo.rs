// src/db/ledger_repo.rs

use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::ledger::{ConsumptionEvent, PermissionGrant},
};

#[derive(Clone)]
pub struct LedgerRepository {
    pool: SqlitePool,
}

impl LedgerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CONCESSÕES (PermissionGrant)
    // =========================================================================

    /// Upsert da concessão: a chave composta garante no máximo uma linha
    /// por par (escola, tipo). Conceder de novo atualiza os termos em vez
    /// de criar uma segunda linha ambígua, e re-arma is_allowed.
    pub async fn upsert_grant<'e, E>(
        &self,
        executor: E,
        school_id: Uuid,
        document_type_id: Uuid,
        credits_per_use: Option<i64>,
        granted_by: &str,
        notes: Option<&str>,
    ) -> Result<PermissionGrant, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let grant = sqlx::query_as::<_, PermissionGrant>(
            r#"
            INSERT INTO permission_grants (school_id, document_type_id, is_allowed, credits_per_use, granted_by, granted_at, notes)
            VALUES (?, ?, 1, ?, ?, ?, ?)
            ON CONFLICT (school_id, document_type_id) DO UPDATE SET
                is_allowed = 1,
                credits_per_use = excluded.credits_per_use,
                granted_by = excluded.granted_by,
                granted_at = excluded.granted_at,
                notes = excluded.notes
            RETURNING *
            "#,
        )
        .bind(school_id)
        .bind(document_type_id)
        .bind(credits_per_use)
        .bind(granted_by)
        .bind(Utc::now())
        .bind(notes)
        .fetch_one(executor)
        .await?;

        Ok(grant)
    }

    /// Revogar é transição de estado (is_allowed = 0), não DELETE:
    /// a linha fica como histórico de auditoria.
    /// Retorna 0 linhas quando nunca houve concessão para o par.
    pub async fn revoke_grant<'e, E>(
        &self,
        executor: E,
        school_id: Uuid,
        document_type_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            "UPDATE permission_grants SET is_allowed = 0 WHERE school_id = ? AND document_type_id = ?",
        )
        .bind(school_id)
        .bind(document_type_id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn find_grant<'e, E>(
        &self,
        executor: E,
        school_id: Uuid,
        document_type_id: Uuid,
    ) -> Result<Option<PermissionGrant>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let grant = sqlx::query_as::<_, PermissionGrant>(
            "SELECT * FROM permission_grants WHERE school_id = ? AND document_type_id = ?",
        )
        .bind(school_id)
        .bind(document_type_id)
        .fetch_optional(executor)
        .await?;

        Ok(grant)
    }

    pub async fn list_grants_for_school(
        &self,
        school_id: Uuid,
    ) -> Result<Vec<PermissionGrant>, AppError> {
        let grants = sqlx::query_as::<_, PermissionGrant>(
            "SELECT * FROM permission_grants WHERE school_id = ? ORDER BY granted_at DESC",
        )
        .bind(school_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(grants)
    }

    // =========================================================================
    //  LEDGER (ConsumptionEvent, append-only)
    // =========================================================================

    /// Grava o evento de consumo com o snapshot do saldo resultante.
    /// Nunca existe UPDATE ou DELETE nesta tabela.
    pub async fn record_event<'e, E>(
        &self,
        executor: E,
        school_id: Uuid,
        document_type_id: Uuid,
        credits_charged: i64,
        balance_after: i64,
    ) -> Result<ConsumptionEvent, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let event = sqlx::query_as::<_, ConsumptionEvent>(
            r#"
            INSERT INTO consumption_events (id, school_id, document_type_id, credits_charged, balance_after, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(school_id)
        .bind(document_type_id)
        .bind(credits_charged)
        .bind(balance_after)
        .bind(Utc::now())
        .fetch_one(executor)
        .await?;

        Ok(event)
    }

    /// Leitura usada pelo billing/relatórios: mais recentes primeiro.
    pub async fn list_events_for_school(
        &self,
        school_id: Uuid,
    ) -> Result<Vec<ConsumptionEvent>, AppError> {
        let events = sqlx::query_as::<_, ConsumptionEvent>(
            "SELECT * FROM consumption_events WHERE school_id = ? ORDER BY created_at DESC",
        )
        .bind(school_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }
}
