// src/common/error.rs

use thiserror::Error;

// Categoria do erro, usada pelo painel para decidir como exibir o banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Validation,
    UserInput,
}

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Nenhuma variante é fatal: cada uma degrada só o painel que a produziu.
#[derive(Debug, Error)]
pub enum AppError {
    // Falha de transporte (conexão recusada, timeout, DNS...)
    #[error("Falha de rede: {0}")]
    NetworkError(#[from] reqwest::Error),

    // O backend respondeu, mas com status fora de 2xx
    #[error("Backend respondeu {status}: {message}")]
    HttpStatus { status: u16, message: String },

    // Payload com formato inesperado (ex: série horária com tamanho errado)
    #[error("Payload inválido: {0}")]
    ValidationError(String),

    #[error("JSON malformado: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    // Entrada do usuário rejeitada localmente, nenhuma requisição é feita
    #[error("Entrada inválida")]
    UserInputError(#[from] validator::ValidationErrors),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::NetworkError(_) | AppError::HttpStatus { .. } => ErrorKind::Network,
            AppError::ValidationError(_) | AppError::MalformedPayload(_) => ErrorKind::Validation,
            AppError::UserInputError(_) => ErrorKind::UserInput,
        }
    }

    /// Mensagem curta para o banner do painel.
    pub fn banner_message(&self) -> String {
        match self {
            // Retorna todas as mensagens de validação, campo a campo.
            AppError::UserInputError(errors) => {
                let mut messages: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, field_errors)| {
                        field_errors.iter().map(move |e| match &e.message {
                            Some(m) => m.to_string(),
                            None => format!("Campo '{}' inválido.", field),
                        })
                    })
                    .collect();
                messages.sort();
                messages.join(" ")
            }
            AppError::HttpStatus { status, message } => {
                format!("O servidor recusou a requisição ({}): {}", status, message)
            }
            AppError::NetworkError(_) => {
                "Falha ao contatar o servidor. Verifique se o backend está rodando.".to_string()
            }
            // Payload quebrado é bug do backend: registra o detalhe e mostra algo genérico.
            ref e => {
                tracing::error!("Payload inesperado do backend: {}", e);
                "O servidor enviou dados em formato inesperado.".to_string()
            }
        }
    }
}
