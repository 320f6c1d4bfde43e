// src/services/school_service.rs

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::SchoolRepository,
    models::school::{School, SchoolPlan, SchoolStatus},
};

#[derive(Clone)]
pub struct SchoolService {
    school_repo: SchoolRepository,
    pool: SqlitePool, // Usamos a pool para iniciar transações
}

impl SchoolService {
    pub fn new(school_repo: SchoolRepository, pool: SqlitePool) -> Self {
        Self { school_repo, pool }
    }

    /// Registra um tenant novo: saldo zerado, status TRIAL.
    pub async fn create_school(
        &self,
        name: &str,
        contact_email: &str,
        plan: SchoolPlan,
    ) -> Result<School, AppError> {
        self.school_repo
            .create_school(&self.pool, name, contact_email, plan)
            .await
    }

    pub async fn get_school(&self, school_id: Uuid) -> Result<School, AppError> {
        self.school_repo
            .find_by_id(&self.pool, school_id)
            .await?
            .ok_or(AppError::SchoolNotFound)
    }

    pub async fn list_schools(&self) -> Result<Vec<School>, AppError> {
        self.school_repo.list_all().await
    }

    /// ÚNICO ponto sancionado de mutação de saldo.
    /// Delta positivo = top-up (soma ao total); delta negativo = consumo
    /// (débito condicional: falha sem alterar nada se o disponível não cobre).
    pub async fn adjust_credits(&self, school_id: Uuid, delta: i64) -> Result<School, AppError> {
        let mut tx = self.pool.begin().await?;

        if delta >= 0 {
            let rows = self
                .school_repo
                .top_up_credits(&mut *tx, school_id, delta)
                .await?;
            if rows == 0 {
                return Err(AppError::SchoolNotFound);
            }
        } else {
            let amount = -delta;
            let rows = self
                .school_repo
                .charge_credits(&mut *tx, school_id, amount)
                .await?;
            if rows == 0 {
                // 0 linhas: ou a escola não existe, ou o saldo não cobre.
                let school = self
                    .school_repo
                    .find_by_id(&mut *tx, school_id)
                    .await?
                    .ok_or(AppError::SchoolNotFound)?;
                return Err(AppError::InsufficientBalance {
                    needed: amount,
                    available: school.available_credits(),
                });
            }
        }

        let school = self
            .school_repo
            .find_by_id(&mut *tx, school_id)
            .await?
            .ok_or(AppError::SchoolNotFound)?;

        tx.commit().await?;
        Ok(school)
    }

    /// Aplica uma transição de status validada contra a tabela do ciclo
    /// de vida. Escolas nunca são apagadas, só transicionam.
    pub async fn set_status(
        &self,
        school_id: Uuid,
        new_status: SchoolStatus,
    ) -> Result<School, AppError> {
        let mut tx = self.pool.begin().await?;

        let school = self
            .school_repo
            .find_by_id(&mut *tx, school_id)
            .await?
            .ok_or(AppError::SchoolNotFound)?;

        if !school.status.can_transition_to(new_status) {
            return Err(AppError::InvalidTransition {
                from: school.status,
                to: new_status,
            });
        }

        self.school_repo
            .set_status(&mut *tx, school_id, new_status)
            .await?;

        let school = self
            .school_repo
            .find_by_id(&mut *tx, school_id)
            .await?
            .ok_or(AppError::SchoolNotFound)?;

        tx.commit().await?;
        Ok(school)
    }
}
