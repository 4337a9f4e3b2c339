// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Error taxonomy for the library seams. Command handlers wrap these in
//! `anyhow` and turn them into notices.

use crate::models::Kind;

/// Fallback message used when the server did not say what went wrong.
pub const GENERIC_FAILURE: &str = "Ocorreu um erro inesperado";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, TLS, connection reset).
    #[error("falha de rede: {0}")]
    Network(String),

    /// The server answered with a non-success HTTP status.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// 2xx response whose envelope reports a failure.
    #[error("{0}")]
    Rejected(String),

    /// The body was not the JSON shape we expected.
    #[error("resposta inválida do servidor: {0}")]
    Decode(String),

    #[error("sessão não autenticada, faça login novamente")]
    Unauthenticated,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ApiError {
    /// Message suitable for a user-facing notice.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http { message, .. } | ApiError::Rejected(message) if !message.is_empty() => {
                message.clone()
            }
            ApiError::Http { .. } | ApiError::Rejected(_) | ApiError::Network(_) => {
                GENERIC_FAILURE.to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Form validation failures, raised before anything is sent.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("o campo '{0}' é obrigatório")]
    EmptyField(&'static str),

    #[error("o valor deve ser maior que zero")]
    NonPositiveAmount,

    /// The stored amount could not be read, so it cannot be sent back as-is.
    #[error("o valor registrado não pôde ser lido; edite a transação informando o valor")]
    UnreadableAmount,

    /// Category or cost center belongs to the other transaction kind.
    #[error("{field} do tipo '{found}' não pode ser usado numa transação do tipo '{expected}'")]
    KindMismatch {
        field: &'static str,
        expected: Kind,
        found: Kind,
    },

    #[error("a confirmação de senha não confere")]
    PasswordMismatch,

    #[error("e-mail inválido: {0}")]
    InvalidEmail(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("não foi possível ler o arquivo: {0}")]
    Io(#[from] std::io::Error),

    #[error("formato de arquivo não suportado: {0}")]
    UnsupportedFormat(String),

    /// The file was read but could not be parsed; one entry per problem.
    #[error("erro ao processar planilha: {}", .0.join("; "))]
    Parse(Vec<String>),

    #[error("erro ao gravar arquivo: {0}")]
    Write(String),
}

impl From<csv::Error> for SheetError {
    fn from(err: csv::Error) -> Self {
        SheetError::Write(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for SheetError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        SheetError::Write(err.to_string())
    }
}
