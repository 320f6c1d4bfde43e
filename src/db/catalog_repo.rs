// src/db/catalog_repo.rs

use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::{common::error::AppError, models::catalog::DocumentType};

#[derive(Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_document_type<'e, E>(
        &self,
        executor: E,
        name: &str,
        local_name: Option<&str>,
        category: &str,
        base_credit_cost: i64,
    ) -> Result<DocumentType, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let doc_type = sqlx::query_as::<_, DocumentType>(
            r#"
            INSERT INTO document_types (id, name, local_name, category, base_credit_cost, is_active, created_at)
            VALUES (?, ?, ?, ?, ?, 1, ?)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(local_name)
        .bind(category)
        .bind(base_credit_cost)
        .bind(Utc::now())
        .fetch_one(executor)
        .await?;

        Ok(doc_type)
    }

    /// Busca SEM filtro de ativo (visão do admin do provedor).
    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<DocumentType>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let doc_type =
            sqlx::query_as::<_, DocumentType>("SELECT * FROM document_types WHERE id = ?")
                .bind(id)
                .fetch_optional(executor)
                .await?;

        Ok(doc_type)
    }

    /// Busca só entre os ativos: tipos desativados são invisíveis para
    /// concessão e consumo até serem reativados.
    pub async fn find_active_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<DocumentType>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let doc_type = sqlx::query_as::<_, DocumentType>(
            "SELECT * FROM document_types WHERE id = ? AND is_active = 1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(doc_type)
    }

    pub async fn list_active(&self) -> Result<Vec<DocumentType>, AppError> {
        // Ordem estável por nome
        let doc_types = sqlx::query_as::<_, DocumentType>(
            "SELECT * FROM document_types WHERE is_active = 1 ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(doc_types)
    }

    /// Visão do admin: inclui os desativados, para poder reativar.
    pub async fn list_all(&self) -> Result<Vec<DocumentType>, AppError> {
        let doc_types =
            sqlx::query_as::<_, DocumentType>("SELECT * FROM document_types ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(doc_types)
    }

    /// Liga/desliga a visibilidade. Não mexe nas concessões existentes.
    pub async fn set_active<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        active: bool,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("UPDATE document_types SET is_active = ? WHERE id = ?")
            .bind(active)
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
