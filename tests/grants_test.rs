// Testes das concessões: upsert, revogação e lote tudo-ou-nada.

use scholaris_backend::{
    common::error::AppError,
    config::AppState,
    db::MIGRATOR,
    models::{catalog::DocumentType, school::School, school::SchoolPlan, school::SchoolStatus},
};
use sqlx::sqlite::SqlitePoolOptions;
use uuid::Uuid;

/// Sobe um banco em memória migrado e o grafo de serviços.
async fn setup() -> AppState {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("pool em memória");
    MIGRATOR.run(&pool).await.expect("migrações");
    AppState::from_pool(pool, "test-key")
}

async fn nova_escola(state: &AppState) -> School {
    state
        .school_service
        .create_school("Colégio Modelo", "secretaria@modelo.edu.br", SchoolPlan::Pro)
        .await
        .expect("criar escola")
}

async fn novo_tipo(state: &AppState, name: &str, custo: i64) -> DocumentType {
    state
        .catalog_service
        .create_document_type(name, None, "certificates", custo)
        .await
        .expect("criar tipo de documento")
}

#[tokio::test]
async fn conceder_duas_vezes_mantem_uma_unica_linha() {
    let state = setup().await;
    let school = nova_escola(&state).await;
    let doc = novo_tipo(&state, "Enrollment Certificate", 3).await;

    state
        .ledger_service
        .grant_permission(school.id, doc.id, Some(5), "admin1", None)
        .await
        .unwrap();
    state
        .ledger_service
        .grant_permission(school.id, doc.id, Some(5), "admin1", None)
        .await
        .unwrap();

    let grants = state.ledger_service.list_grants(school.id).await.unwrap();
    assert_eq!(grants.len(), 1);
    assert!(grants[0].is_allowed);
    assert_eq!(grants[0].credits_per_use, Some(5));
}

#[tokio::test]
async fn reconceder_atualiza_os_termos_em_vez_de_errar() {
    let state = setup().await;
    let school = nova_escola(&state).await;
    let doc = novo_tipo(&state, "Transcript", 4).await;

    state
        .ledger_service
        .grant_permission(school.id, doc.id, Some(5), "admin1", None)
        .await
        .unwrap();

    let grant = state
        .ledger_service
        .grant_permission(school.id, doc.id, Some(2), "admin2", None)
        .await
        .unwrap();

    assert_eq!(grant.credits_per_use, Some(2));
    assert_eq!(grant.granted_by, "admin2");

    let grants = state.ledger_service.list_grants(school.id).await.unwrap();
    assert_eq!(grants.len(), 1);
}

#[tokio::test]
async fn revogar_sem_concessao_e_erro_e_nao_no_op() {
    let state = setup().await;
    let school = nova_escola(&state).await;
    let doc = novo_tipo(&state, "Report Card", 2).await;

    let err = state
        .ledger_service
        .revoke_permission(school.id, doc.id)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::GrantNotFound));
}

#[tokio::test]
async fn revogar_preserva_a_linha_como_auditoria() {
    let state = setup().await;
    let school = nova_escola(&state).await;
    let doc = novo_tipo(&state, "Attendance Report", 2).await;

    state
        .ledger_service
        .grant_permission(school.id, doc.id, None, "admin", Some("liberado no onboarding"))
        .await
        .unwrap();
    state
        .ledger_service
        .revoke_permission(school.id, doc.id)
        .await
        .unwrap();

    // A linha continua lá, desarmada
    let grants = state.ledger_service.list_grants(school.id).await.unwrap();
    assert_eq!(grants.len(), 1);
    assert!(!grants[0].is_allowed);
}

#[tokio::test]
async fn reconceder_apos_revogacao_rearma_a_permissao() {
    let state = setup().await;
    let school = nova_escola(&state).await;
    let doc = novo_tipo(&state, "Certificate of Conduct", 1).await;
    state
        .school_service
        .adjust_credits(school.id, 5)
        .await
        .unwrap();

    state
        .ledger_service
        .grant_permission(school.id, doc.id, None, "admin", None)
        .await
        .unwrap();
    state
        .ledger_service
        .revoke_permission(school.id, doc.id)
        .await
        .unwrap();
    state
        .ledger_service
        .grant_permission(school.id, doc.id, None, "admin", None)
        .await
        .unwrap();

    // Revogada -> concedida de novo: o consumo volta a funcionar
    let event = state.ledger_service.consume(school.id, doc.id).await.unwrap();
    assert_eq!(event.credits_charged, 1);
}

#[tokio::test]
async fn conceder_para_escola_suspensa_falha() {
    let state = setup().await;
    let school = nova_escola(&state).await;
    let doc = novo_tipo(&state, "Diploma", 10).await;

    state
        .school_service
        .set_status(school.id, SchoolStatus::Active)
        .await
        .unwrap();
    state
        .school_service
        .set_status(school.id, SchoolStatus::Suspended)
        .await
        .unwrap();

    let err = state
        .ledger_service
        .grant_permission(school.id, doc.id, None, "admin", None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::TenantInactive(SchoolStatus::Suspended)
    ));
}

#[tokio::test]
async fn conceder_para_escola_inexistente_da_not_found() {
    let state = setup().await;
    let doc = novo_tipo(&state, "Transfer Letter", 2).await;

    let err = state
        .ledger_service
        .grant_permission(Uuid::new_v4(), doc.id, None, "admin", None)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::SchoolNotFound));
}

#[tokio::test]
async fn conceder_tipo_desativado_falha_ate_reativar() {
    let state = setup().await;
    let school = nova_escola(&state).await;
    let doc = novo_tipo(&state, "Library Card", 1).await;

    state
        .catalog_service
        .set_active(doc.id, false)
        .await
        .unwrap();

    let err = state
        .ledger_service
        .grant_permission(school.id, doc.id, None, "admin", None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DocumentTypeNotFound));

    // Reativado, a concessão volta a ser possível
    state
        .catalog_service
        .set_active(doc.id, true)
        .await
        .unwrap();
    let grant = state
        .ledger_service
        .grant_permission(school.id, doc.id, None, "admin", None)
        .await
        .unwrap();
    assert!(grant.is_allowed);
}

#[tokio::test]
async fn bulk_com_um_id_invalido_nao_aplica_nada() {
    let state = setup().await;
    let school = nova_escola(&state).await;

    let mut ids = Vec::new();
    for i in 0..5 {
        let doc = novo_tipo(&state, &format!("Doc {}", i), 2).await;
        ids.push(doc.id);
    }
    // Um intruso inválido no meio da lista
    ids.insert(3, Uuid::new_v4());

    let err = state
        .ledger_service
        .bulk_grant(school.id, &ids, Some(2), "admin")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DocumentTypeNotFound));

    // Tudo-ou-nada: NENHUMA concessão foi criada
    let grants = state.ledger_service.list_grants(school.id).await.unwrap();
    assert!(grants.is_empty());
}

#[tokio::test]
async fn bulk_valido_aplica_todas_as_concessoes() {
    let state = setup().await;
    let school = nova_escola(&state).await;

    let mut ids = Vec::new();
    for i in 0..3 {
        let doc = novo_tipo(&state, &format!("Form {}", i), 1).await;
        ids.push(doc.id);
    }

    let grants = state
        .ledger_service
        .bulk_grant(school.id, &ids, None, "admin")
        .await
        .unwrap();

    assert_eq!(grants.len(), 3);
    assert!(grants.iter().all(|g| g.is_allowed));

    let stored = state.ledger_service.list_grants(school.id).await.unwrap();
    assert_eq!(stored.len(), 3);
}
