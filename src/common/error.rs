use serde_json::json;
use thiserror::Error;

use crate::models::auth::{EntityKind, Operation};

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Nenhuma falha é engolida: toda variante aborta a operação corrente e sobe
// até a camada de API com contexto suficiente (tipo e chave ofensora) para
// montar uma mensagem precisa.
#[derive(Debug, Error)]
pub enum AppError {
    // Identificador opaco malformado ou forjado. Sempre erro do cliente.
    #[error("Identificador inválido: {0}")]
    InvalidIdentifier(String),

    #[error("Você não tem permissão para {operation} {entity}.")]
    PermissionDenied {
        entity: EntityKind,
        operation: Operation,
    },

    // Referência cruzada inexistente, detectada antes de qualquer escrita.
    #[error("{kind} não encontrado com id {key}")]
    ReferenceNotFound { kind: EntityKind, key: i64 },

    #[error("status deve ser active ou inactive, recebido \"{0}\"")]
    InvalidStatus(String),

    #[error("Registro não encontrado: {kind} {key}")]
    NotFound { kind: EntityKind, key: i64 },

    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Falha do colaborador de persistência no meio da fase de escrita.
    // A transação inteira já foi revertida quando esta variante sobe;
    // é seguro repetir a operação completa.
    #[error("Falha na escrita atômica: {0}")]
    AtomicWriteFailure(String),

    // Variante para erros de banco de dados fora da fase de escrita.
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),
}

impl AppError {
    // Erros do cliente nunca são repetidos; erros do servidor podem ser.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            AppError::AtomicWriteFailure(_) | AppError::DatabaseError(_)
        )
    }

    // Corpo estruturado para a camada de API renderizar, no mesmo formato
    // que os handlers usam: { "error": ..., "details": ... }.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                })
            }
            AppError::PermissionDenied { entity, operation } => json!({
                "error": self.to_string(),
                "details": { "entity": entity, "operation": operation },
            }),
            AppError::ReferenceNotFound { kind, key } | AppError::NotFound { kind, key } => {
                json!({
                    "error": self.to_string(),
                    "details": { "entity": kind, "key": key },
                })
            }
            ref e => {
                // O `tracing` registra a mensagem detalhada; o cliente recebe
                // apenas o texto da variante.
                if !e.is_client_error() {
                    tracing::error!("Erro Interno do Servidor: {}", e);
                }
                json!({ "error": e.to_string() })
            }
        }
    }
}
