// src/services/ledger_service.rs

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CatalogRepository, LedgerRepository, SchoolRepository},
    models::ledger::{ConsumptionEvent, PermissionGrant},
};

// O coração do subsistema: quem pode gerar o quê, a que custo, e o
// registro de cada consumo. O saldo em si pertence ao SchoolRepository;
// aqui só chamamos o débito condicional dele, nunca escrevemos direto.
#[derive(Clone)]
pub struct LedgerService {
    ledger_repo: LedgerRepository,
    school_repo: SchoolRepository,
    catalog_repo: CatalogRepository,
    pool: SqlitePool,
}

impl LedgerService {
    pub fn new(
        ledger_repo: LedgerRepository,
        school_repo: SchoolRepository,
        catalog_repo: CatalogRepository,
        pool: SqlitePool,
    ) -> Self {
        Self {
            ledger_repo,
            school_repo,
            catalog_repo,
            pool,
        }
    }

    /// Concede (ou re-concede) a permissão de um tipo de documento a uma
    /// escola. Semântica de upsert: conceder algo já concedido atualiza
    /// os termos em vez de dar erro.
    pub async fn grant_permission(
        &self,
        school_id: Uuid,
        document_type_id: Uuid,
        credits_per_use: Option<i64>,
        granted_by: &str,
        notes: Option<&str>,
    ) -> Result<PermissionGrant, AppError> {
        let mut tx = self.pool.begin().await?;

        let school = self
            .school_repo
            .find_by_id(&mut *tx, school_id)
            .await?
            .ok_or(AppError::SchoolNotFound)?;

        if !school.status.is_operational() {
            return Err(AppError::TenantInactive(school.status));
        }

        // O tipo precisa existir E estar ativo para ser concedido.
        self.catalog_repo
            .find_active_by_id(&mut *tx, document_type_id)
            .await?
            .ok_or(AppError::DocumentTypeNotFound)?;

        let grant = self
            .ledger_repo
            .upsert_grant(
                &mut *tx,
                school_id,
                document_type_id,
                credits_per_use,
                granted_by,
                notes,
            )
            .await?;

        tx.commit().await?;
        Ok(grant)
    }

    /// Revogar algo nunca concedido é erro (expõe bug do chamador),
    /// não um no-op silencioso.
    pub async fn revoke_permission(
        &self,
        school_id: Uuid,
        document_type_id: Uuid,
    ) -> Result<(), AppError> {
        let rows = self
            .ledger_repo
            .revoke_grant(&self.pool, school_id, document_type_id)
            .await?;

        if rows == 0 {
            return Err(AppError::GrantNotFound);
        }

        Ok(())
    }

    /// Concessão em lote para UMA escola: tudo-ou-nada dentro de uma
    /// única transação. Se qualquer id for inválido, nenhuma concessão
    /// é aplicada (a transação inteira desfaz no primeiro erro).
    pub async fn bulk_grant(
        &self,
        school_id: Uuid,
        document_type_ids: &[Uuid],
        credits_per_use: Option<i64>,
        granted_by: &str,
    ) -> Result<Vec<PermissionGrant>, AppError> {
        let mut tx = self.pool.begin().await?;

        let school = self
            .school_repo
            .find_by_id(&mut *tx, school_id)
            .await?
            .ok_or(AppError::SchoolNotFound)?;

        if !school.status.is_operational() {
            return Err(AppError::TenantInactive(school.status));
        }

        let mut grants = Vec::with_capacity(document_type_ids.len());
        for document_type_id in document_type_ids {
            self.catalog_repo
                .find_active_by_id(&mut *tx, *document_type_id)
                .await?
                .ok_or(AppError::DocumentTypeNotFound)?;

            let grant = self
                .ledger_repo
                .upsert_grant(
                    &mut *tx,
                    school_id,
                    *document_type_id,
                    credits_per_use,
                    granted_by,
                    None,
                )
                .await?;

            grants.push(grant);
        }

        tx.commit().await?;
        Ok(grants)
    }

    pub async fn list_grants(&self, school_id: Uuid) -> Result<Vec<PermissionGrant>, AppError> {
        self.ledger_repo.list_grants_for_school(school_id).await
    }

    /// O caminho crítico: chamado pela geração de documentos ANTES de
    /// renderizar qualquer coisa. Ordem das checagens:
    /// concessão -> status do tenant -> custo -> débito -> ledger.
    pub async fn consume(
        &self,
        school_id: Uuid,
        document_type_id: Uuid,
    ) -> Result<ConsumptionEvent, AppError> {
        let mut tx = self.pool.begin().await?;

        // 1. A concessão precisa existir e estar armada.
        let grant = self
            .ledger_repo
            .find_grant(&mut *tx, school_id, document_type_id)
            .await?;
        let grant = match grant {
            Some(g) if g.is_allowed => g,
            _ => return Err(AppError::PermissionDenied),
        };

        // 2. O tenant precisa estar operacional, independente de saldo.
        let school = self
            .school_repo
            .find_by_id(&mut *tx, school_id)
            .await?
            .ok_or(AppError::SchoolNotFound)?;
        if !school.status.is_operational() {
            return Err(AppError::TenantInactive(school.status));
        }

        // 3. Custo: override da concessão, senão o custo base do catálogo.
        //    Tipo desativado é invisível para consumo.
        let doc_type = self
            .catalog_repo
            .find_active_by_id(&mut *tx, document_type_id)
            .await?
            .ok_or(AppError::DocumentTypeNotFound)?;
        let cost = grant.credits_per_use.unwrap_or(doc_type.base_credit_cost);

        // 4. Checagem de saldo + débito em UM único update condicional.
        //    Nada de read-then-write: consumos concorrentes da mesma
        //    escola nunca passam ambos por uma leitura velha.
        let rows = self
            .school_repo
            .charge_credits(&mut *tx, school_id, cost)
            .await?;
        if rows == 0 {
            return Err(AppError::InsufficientCredits {
                needed: cost,
                available: school.available_credits(),
            });
        }

        // 5. Grava o evento no ledger com o snapshot do saldo resultante.
        let charged = self
            .school_repo
            .find_by_id(&mut *tx, school_id)
            .await?
            .ok_or(AppError::SchoolNotFound)?;
        let event = self
            .ledger_repo
            .record_event(
                &mut *tx,
                school_id,
                document_type_id,
                cost,
                charged.available_credits(),
            )
            .await?;

        tx.commit().await?;
        Ok(event)
    }

    pub async fn list_consumption_events(
        &self,
        school_id: Uuid,
    ) -> Result<Vec<ConsumptionEvent>, AppError> {
        self.ledger_repo.list_events_for_school(school_id).await
    }
}
