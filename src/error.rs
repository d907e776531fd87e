// ============================================================================
// ERRORES - Tipos de error compartidos por servicios y stores
// ============================================================================

use serde::Deserialize;
use thiserror::Error;

/// Errores de almacenamiento persistente (localStorage / archivo)
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,

    #[error("could not write key `{key}`")]
    Write { key: String },

    #[error("storage file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Errores de la capa API (adapter HTTP + servicios)
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    /// 401: la sesión expiró o el token fue rechazado
    #[error("session expired")]
    Unauthorized,

    /// Cualquier otra respuesta no-2xx, con el body intacto
    #[error("HTTP {status}: {message}")]
    Status {
        status: u16,
        message: String,
        body: String,
    },

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("parse error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Body de error que devuelve el backend (`{ message, statusCode }`)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    message: String,
    #[allow(dead_code)]
    status_code: Option<u16>,
}

impl ApiError {
    /// Construye un error de estado a partir de una respuesta no-2xx
    pub fn from_status(status: u16, body: String) -> Self {
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|parsed| parsed.message)
            .unwrap_or_else(|_| {
                if body.is_empty() {
                    "Unknown error".to_string()
                } else {
                    body.clone()
                }
            });

        ApiError::Status {
            status,
            message,
            body,
        }
    }

    /// Código HTTP asociado, si lo hay
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
