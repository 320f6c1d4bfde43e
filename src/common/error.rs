use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::school::SchoolStatus;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Cada variante é uma violação de regra de negócio e nunca é re-tentada;
// só falhas transitórias de storage são re-tentadas (ver db_utils).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Escola não encontrada")]
    SchoolNotFound,

    #[error("Tipo de documento não encontrado ou inativo")]
    DocumentTypeNotFound,

    #[error("Nenhuma concessão registrada para esta escola e tipo de documento")]
    GrantNotFound,

    #[error("Tenant inativo: status atual {0:?} não permite esta operação")]
    TenantInactive(SchoolStatus),

    #[error("Transição de status inválida: {from:?} -> {to:?}")]
    InvalidTransition {
        from: SchoolStatus,
        to: SchoolStatus,
    },

    #[error("Permissão negada: nenhuma concessão ativa para este tipo de documento")]
    PermissionDenied,

    // As mensagens carregam o detalhe (necessário vs disponível) porque
    // guiam decisões de cobrança do lado do provedor.
    #[error("Créditos insuficientes: necessários {needed}, disponíveis {available}")]
    InsufficientCredits { needed: i64, available: i64 },

    #[error("Saldo insuficiente: débito de {needed} excede o disponível {available}")]
    InsufficientBalance { needed: i64, available: i64 },

    #[error("Chave de provedor inválida ou ausente")]
    InvalidProviderKey,

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::SchoolNotFound
            | AppError::DocumentTypeNotFound
            | AppError::GrantNotFound => (StatusCode::NOT_FOUND, self.to_string()),

            AppError::TenantInactive(_)
            | AppError::InvalidTransition { .. }
            | AppError::PermissionDenied
            | AppError::InsufficientCredits { .. }
            | AppError::InsufficientBalance { .. } => (StatusCode::CONFLICT, self.to_string()),

            AppError::InvalidProviderKey => (StatusCode::UNAUTHORIZED, self.to_string()),

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O cliente recebe uma mensagem genérica; o detalhe vai para o log.
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
