use thiserror::Error;

/// Errores de validación del catálogo y de las reglas. Se levantan de forma
/// síncrona en tiempo de edición, nunca se corrigen silenciosamente.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("validación fallida: {0}")]
    Validation(String),
    #[error("componente fuera del catálogo: {0}")]
    MissingComponent(String),
}
