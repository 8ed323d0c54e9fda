//! Tipos de evento de una resolución y estructura `DemandEvent`.
//!
//! Rol:
//! - El resolver emite un evento por cada transición observable de un nodo
//!   del árbol de demandas (emitida, supplier invocado, miss, resultado).
//! - Un soft-miss no es un error, así que esta traza es la forma de
//!   inspeccionarlo después de la resolución.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DemandError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DemandEventKind {
    /// La request pasó validación y entra al resolver.
    DemandIssued { key: String, type_name: String, path: String, depth: usize },
    /// Se encontró supplier y se invocó.
    SupplierInvoked { type_name: String, path: String },
    /// Soft-miss: ningún supplier registrado para el tipo en este scope.
    SupplierMissing { type_name: String, path: String },
    /// El supplier terminó; `has_value` distingue `Some` de `None`.
    DemandSupplied { path: String, has_value: bool },
    /// La demanda terminó con error (validación, supplier o profundidad).
    DemandFailed { path: String, error: DemandError },
}

impl DemandEventKind {
    pub fn path(&self) -> &str {
        match self {
            Self::DemandIssued { path, .. }
            | Self::SupplierInvoked { path, .. }
            | Self::SupplierMissing { path, .. }
            | Self::DemandSupplied { path, .. }
            | Self::DemandFailed { path, .. } => path,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandEvent {
    pub seq: u64, // orden de append dentro de la resolución
    pub resolution_id: Uuid,
    pub kind: DemandEventKind,
    pub ts: DateTime<Utc>,
}
