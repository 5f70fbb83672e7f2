//! Error types for the course browser

use thiserror::Error;

/// Result type alias for course browser operations
pub type Result<T> = std::result::Result<T, Error>;

/// Course browser errors
#[derive(Debug, Error)]
pub enum Error {
    /// Network/HTTP failure reaching the gateway or the RAG API
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx status from a remote service
    #[error("Remote service returned HTTP {status}{}", detail_suffix(.message))]
    RemoteService {
        status: u16,
        message: Option<String>,
    },

    /// RAG envelope or payload could not be decoded
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Decoded payload is missing an expected field
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn detail_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {}", m))
        .unwrap_or_default()
}

impl Error {
    /// Create a remote service error without a body message
    pub fn remote(status: u16) -> Self {
        Self::RemoteService {
            status,
            message: None,
        }
    }

    /// Create a malformed response error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::RemoteService { status, .. } => Some(*status),
            Error::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Localized text shown to the user for this failure
    pub fn user_message(&self) -> String {
        match self {
            Error::Transport(_) => "No se pudo conectar con el servidor".to_string(),
            Error::RemoteService {
                message: Some(msg), ..
            } => msg.clone(),
            Error::RemoteService { status, .. } => format!("Error en la API: {}", status),
            Error::MalformedResponse(_) => "Error al parsear la respuesta de la API".to_string(),
            Error::Validation(_) => {
                "La respuesta de la API no tiene el formato esperado".to_string()
            }
            Error::Config(msg) => format!("Error de configuración: {}", msg),
            Error::Io(_) => "Error al guardar el archivo".to_string(),
            Error::Json(_) => "Error al leer la respuesta".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_service_display() {
        let err = Error::remote(503);
        assert_eq!(err.to_string(), "Remote service returned HTTP 503");
        assert_eq!(err.status(), Some(503));

        let err = Error::RemoteService {
            status: 404,
            message: Some("Archivo no encontrado".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Remote service returned HTTP 404: Archivo no encontrado"
        );
        assert_eq!(err.user_message(), "Archivo no encontrado");
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(Error::remote(500).user_message(), "Error en la API: 500");
        assert_eq!(
            Error::validation("flashcards missing").user_message(),
            "La respuesta de la API no tiene el formato esperado"
        );
        assert!(Error::malformed("x").status().is_none());
    }
}
