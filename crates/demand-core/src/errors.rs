//! Errores del mecanismo de demanda/suministro.
//!
//! Un soft-miss (tipo sin supplier) NO es un error: se representa como
//! `Ok(None)` en `DemandReturn`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum DemandError {
    #[error("validation failed: {0}")] Validation(String),
    #[error("supplier failed at {path}: {message}")] Supplier { path: String, message: String },
    #[error("max demand depth {max_depth} exceeded at {path}")] DepthExceeded { path: String, max_depth: usize },
}

impl DemandError {
    /// Atajo para que un supplier reporte su propio fallo.
    pub fn supplier(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Supplier { path: path.into(),
                         message: message.into() }
    }

    /// `true` para errores de validación de la request.
    #[inline]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
