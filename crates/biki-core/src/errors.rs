//! Errores específicos del motor de generación.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum CoreEngineError {
    #[error("catálogo inválido: {0}")] InvalidCatalog(String),
    #[error("regla inválida: {0}")] InvalidRule(String),
    #[error("internal: {0}")] Internal(String),
}
