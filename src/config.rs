// src/config.rs

use sqlx::SqlitePool;
use std::env;

use crate::{
    common::db_utils::connect_with_retry,
    db::{CatalogRepository, LedgerRepository, SchoolRepository},
    services::{CatalogService, LedgerService, SchoolService},
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub provider_key: String,
    pub school_service: SchoolService,
    pub catalog_service: CatalogService,
    pub ledger_service: LedgerService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let provider_key = env::var("PROVIDER_API_KEY").expect("PROVIDER_API_KEY deve ser definida");

        // Conecta ao banco com retry (falha transitória é a única
        // categoria re-tentada em todo o serviço)
        let db_pool = connect_with_retry(&database_url).await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::from_pool(db_pool, &provider_key))
    }

    /// Monta o grafo de dependências a partir de uma pool pronta.
    /// Os testes de integração usam este construtor com pools em memória.
    pub fn from_pool(db_pool: SqlitePool, provider_key: &str) -> Self {
        let school_repo = SchoolRepository::new(db_pool.clone());
        let catalog_repo = CatalogRepository::new(db_pool.clone());
        let ledger_repo = LedgerRepository::new(db_pool.clone());

        let school_service = SchoolService::new(school_repo.clone(), db_pool.clone());
        let catalog_service = CatalogService::new(catalog_repo.clone(), db_pool.clone());
        let ledger_service = LedgerService::new(
            ledger_repo,
            school_repo,
            catalog_repo,
            db_pool.clone(),
        );

        Self {
            db_pool,
            provider_key: provider_key.to_string(),
            school_service,
            catalog_service,
            ledger_service,
        }
    }
}
