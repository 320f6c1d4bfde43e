//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, patch, post},
    Router,
};
use tokio::net::TcpListener;

use scholaris_backend::{
    config::AppState,
    db::MIGRATOR,
    docs,
    handlers,
    middleware::provider::provider_guard,
};

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    MIGRATOR
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas do diretório de escolas + concessões + ledger.
    // Tudo aqui é ação administrativa do provedor (ou chamada
    // service-to-service da geração de documentos), então o guard
    // de chave de provedor cobre o grupo inteiro.
    let school_routes = Router::new()
        .route(
            "/",
            post(handlers::schools::create_school).get(handlers::schools::list_schools),
        )
        .route("/{id}", get(handlers::schools::get_school))
        .route("/{id}/credits", post(handlers::schools::top_up_credits))
        .route("/{id}/status", patch(handlers::schools::set_school_status))
        .route("/{id}/grants", get(handlers::grants::list_school_grants))
        .route(
            "/{id}/grant-document/{document_type_id}",
            post(handlers::grants::grant_document),
        )
        .route(
            "/{id}/revoke-document/{document_type_id}",
            delete(handlers::grants::revoke_document),
        )
        .route(
            "/{id}/bulk-permissions",
            post(handlers::grants::bulk_permissions),
        )
        .route(
            "/{id}/consume/{document_type_id}",
            post(handlers::grants::consume_document),
        )
        .route(
            "/{id}/consumption-events",
            get(handlers::grants::list_consumption_events),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            provider_guard,
        ));

    let catalog_routes = Router::new()
        .route(
            "/",
            post(handlers::catalog::create_document_type)
                .get(handlers::catalog::list_document_types),
        )
        .route("/all", get(handlers::catalog::list_all_document_types))
        .route("/{id}", get(handlers::catalog::get_document_type))
        .route(
            "/{id}/active",
            patch(handlers::catalog::set_document_type_active),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            provider_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/docs/openapi.json", get(docs::openapi_json))
        .nest("/api/schools", school_routes)
        .nest("/api/document-types", catalog_routes)
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
