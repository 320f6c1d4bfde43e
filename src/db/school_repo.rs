// src/db/school_repo.rs

use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::school::{School, SchoolPlan, SchoolStatus},
};

// Repositório do diretório de tenants. É o DONO do saldo de créditos:
// nenhum outro repositório escreve em total_credits/used_credits.
#[derive(Clone)]
pub struct SchoolRepository {
    pool: SqlitePool,
}

impl SchoolRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Cria uma escola nova: saldo zerado, status TRIAL.
    pub async fn create_school<'e, E>(
        &self,
        executor: E,
        name: &str,
        contact_email: &str,
        plan: SchoolPlan,
    ) -> Result<School, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let now = Utc::now();
        let school = sqlx::query_as::<_, School>(
            r#"
            INSERT INTO schools (id, name, contact_email, plan, status, total_credits, used_credits, created_at, updated_at)
            VALUES (?, ?, ?, ?, 'TRIAL', 0, 0, ?, ?)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(contact_email)
        .bind(plan)
        .bind(now)
        .bind(now)
        .fetch_one(executor)
        .await?;

        Ok(school)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        school_id: Uuid,
    ) -> Result<Option<School>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let school = sqlx::query_as::<_, School>("SELECT * FROM schools WHERE id = ?")
            .bind(school_id)
            .fetch_optional(executor)
            .await?;

        Ok(school)
    }

    /// Listagem do painel do provedor. Só leitura, vai direto na pool.
    pub async fn list_all(&self) -> Result<Vec<School>, AppError> {
        let schools = sqlx::query_as::<_, School>("SELECT * FROM schools ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(schools)
    }

    /// Top-up: soma `amount` ao total de créditos.
    /// Retorna o número de linhas afetadas (0 = escola inexistente).
    pub async fn top_up_credits<'e, E>(
        &self,
        executor: E,
        school_id: Uuid,
        amount: i64,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            "UPDATE schools SET total_credits = total_credits + ?, updated_at = ? WHERE id = ?",
        )
        .bind(amount)
        .bind(Utc::now())
        .bind(school_id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    /// Débito condicional ATÔMICO: checa o saldo e debita no MESMO update.
    /// Dois consumos concorrentes nunca passam ambos por uma leitura velha:
    /// o WHERE garante que só debita se o disponível cobre o custo.
    /// Retorna 0 linhas quando a escola não existe OU o saldo não cobre.
    pub async fn charge_credits<'e, E>(
        &self,
        executor: E,
        school_id: Uuid,
        amount: i64,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"
            UPDATE schools
            SET used_credits = used_credits + ?, updated_at = ?
            WHERE id = ? AND total_credits - used_credits >= ?
            "#,
        )
        .bind(amount)
        .bind(Utc::now())
        .bind(school_id)
        .bind(amount)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn set_status<'e, E>(
        &self,
        executor: E,
        school_id: Uuid,
        new_status: SchoolStatus,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("UPDATE schools SET status = ?, updated_at = ? WHERE id = ?")
            .bind(new_status)
            .bind(Utc::now())
            .bind(school_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
