// src/services/catalog_service.rs

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{common::error::AppError, db::CatalogRepository, models::catalog::DocumentType};

#[derive(Clone)]
pub struct CatalogService {
    catalog_repo: CatalogRepository,
    pool: SqlitePool,
}

impl CatalogService {
    pub fn new(catalog_repo: CatalogRepository, pool: SqlitePool) -> Self {
        Self { catalog_repo, pool }
    }

    pub async fn create_document_type(
        &self,
        name: &str,
        local_name: Option<&str>,
        category: &str,
        base_credit_cost: i64,
    ) -> Result<DocumentType, AppError> {
        self.catalog_repo
            .create_document_type(&self.pool, name, local_name, category, base_credit_cost)
            .await
    }

    pub async fn list_active(&self) -> Result<Vec<DocumentType>, AppError> {
        self.catalog_repo.list_active().await
    }

    pub async fn list_all(&self) -> Result<Vec<DocumentType>, AppError> {
        self.catalog_repo.list_all().await
    }

    /// Tipos inativos são invisíveis aqui (mesma regra do consumo).
    pub async fn get_document_type(&self, id: Uuid) -> Result<DocumentType, AppError> {
        self.catalog_repo
            .find_active_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::DocumentTypeNotFound)
    }

    /// Liga/desliga a visibilidade do tipo. Concessões existentes ficam
    /// como estão; um tipo desativado só não pode ser concedido nem
    /// consumido até voltar.
    pub async fn set_active(&self, id: Uuid, active: bool) -> Result<DocumentType, AppError> {
        let rows = self.catalog_repo.set_active(&self.pool, id, active).await?;
        if rows == 0 {
            return Err(AppError::DocumentTypeNotFound);
        }

        self.catalog_repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::DocumentTypeNotFound)
    }
}
