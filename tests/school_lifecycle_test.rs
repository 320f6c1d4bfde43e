// Testes do diretório de tenants: criação, saldo e ciclo de vida.

use scholaris_backend::{
    common::error::AppError,
    config::AppState,
    db::MIGRATOR,
    models::school::{School, SchoolPlan, SchoolStatus},
};
use sqlx::sqlite::SqlitePoolOptions;

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

async fn nova_escola(state: &AppState, nome: &str) -> School {
    state
        .school_service
        .create_school(nome, "secretaria@escola.edu.br", SchoolPlan::Basic)
        .await
        .expect("criar escola")
}

#[tokio::test]
async fn escola_nova_nasce_em_trial_com_saldo_zero() {
    let state = setup().await;

    let school = nova_escola(&state, "Colégio Alfa").await;

    assert_eq!(school.status, SchoolStatus::Trial);
    assert_eq!(school.plan, SchoolPlan::Basic);
    assert_eq!(school.total_credits, 0);
    assert_eq!(school.used_credits, 0);
    assert_eq!(school.available_credits(), 0);

    // E a leitura volta o mesmo registro
    let fetched = state.school_service.get_school(school.id).await.unwrap();
    assert_eq!(fetched.id, school.id);
    assert_eq!(fetched.name, "Colégio Alfa");
}

#[tokio::test]
async fn buscar_escola_inexistente_da_not_found() {
    let state = setup().await;

    let err = state
        .school_service
        .get_school(uuid::Uuid::new_v4())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::SchoolNotFound));
}

#[tokio::test]
async fn recarga_soma_ao_total() {
    let state = setup().await;
    let school = nova_escola(&state, "Colégio Beta").await;

    let school = state
        .school_service
        .adjust_credits(school.id, 25)
        .await
        .unwrap();

    assert_eq!(school.total_credits, 25);
    assert_eq!(school.used_credits, 0);
    assert_eq!(school.available_credits(), 25);
}

#[tokio::test]
async fn debito_consome_do_disponivel() {
    let state = setup().await;
    let school = nova_escola(&state, "Colégio Gama").await;
    state
        .school_service
        .adjust_credits(school.id, 10)
        .await
        .unwrap();

    let school = state
        .school_service
        .adjust_credits(school.id, -4)
        .await
        .unwrap();

    assert_eq!(school.total_credits, 10);
    assert_eq!(school.used_credits, 4);
    assert_eq!(school.available_credits(), 6);
}

#[tokio::test]
async fn debito_alem_do_saldo_falha_sem_alterar_nada() {
    let state = setup().await;
    let school = nova_escola(&state, "Colégio Delta").await;
    state
        .school_service
        .adjust_credits(school.id, 5)
        .await
        .unwrap();

    let err = state
        .school_service
        .adjust_credits(school.id, -6)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::InsufficientBalance {
            needed: 6,
            available: 5
        }
    ));

    // Saldo intacto: o débito condicional não chegou a aplicar
    let school = state.school_service.get_school(school.id).await.unwrap();
    assert_eq!(school.used_credits, 0);
    assert_eq!(school.available_credits(), 5);
}

#[tokio::test]
async fn transicoes_validas_do_ciclo_de_vida() {
    let state = setup().await;
    let school = nova_escola(&state, "Colégio Épsilon").await;

    // trial -> active
    let school = state
        .school_service
        .set_status(school.id, SchoolStatus::Active)
        .await
        .unwrap();
    assert_eq!(school.status, SchoolStatus::Active);

    // active -> suspended -> active
    let school = state
        .school_service
        .set_status(school.id, SchoolStatus::Suspended)
        .await
        .unwrap();
    assert_eq!(school.status, SchoolStatus::Suspended);

    let school = state
        .school_service
        .set_status(school.id, SchoolStatus::Active)
        .await
        .unwrap();
    assert_eq!(school.status, SchoolStatus::Active);

    // active -> expired (fim de linha; a linha continua existindo)
    let school = state
        .school_service
        .set_status(school.id, SchoolStatus::Expired)
        .await
        .unwrap();
    assert_eq!(school.status, SchoolStatus::Expired);

    let fetched = state.school_service.get_school(school.id).await.unwrap();
    assert_eq!(fetched.status, SchoolStatus::Expired);
}

#[tokio::test]
async fn transicao_invalida_e_rejeitada_sem_efeito() {
    let state = setup().await;
    let school = nova_escola(&state, "Colégio Zeta").await;

    // trial -> suspended não está na tabela
    let err = state
        .school_service
        .set_status(school.id, SchoolStatus::Suspended)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::InvalidTransition {
            from: SchoolStatus::Trial,
            to: SchoolStatus::Suspended
        }
    ));

    // Status não mudou
    let school = state.school_service.get_school(school.id).await.unwrap();
    assert_eq!(school.status, SchoolStatus::Trial);

    // expired é terminal
    state
        .school_service
        .set_status(school.id, SchoolStatus::Active)
        .await
        .unwrap();
    state
        .school_service
        .set_status(school.id, SchoolStatus::Expired)
        .await
        .unwrap();
    let err = state
        .school_service
        .set_status(school.id, SchoolStatus::Active)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition { .. }));
}

#[tokio::test]
async fn listagem_ordena_por_nome() {
    let state = setup().await;
    nova_escola(&state, "Instituto Horizonte").await;
    nova_escola(&state, "Colégio Aurora").await;
    nova_escola(&state, "Escola do Vale").await;

    let schools = state.school_service.list_schools().await.unwrap();
    let names: Vec<&str> = schools.iter().map(|s| s.name.as_str()).collect();

    assert_eq!(
        names,
        vec!["Colégio Aurora", "Escola do Vale", "Instituto Horizonte"]
    );
}
