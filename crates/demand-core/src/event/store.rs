use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;
use uuid::Uuid;

use super::{DemandEvent, DemandEventKind};

/// Traza append-only, compartida entre todas las ramas de una resolución.
pub trait DemandTrace: Send + Sync {
    /// Agrega un evento a partir de su kind y devuelve el evento completo (con seq y ts).
    fn append_kind(&self, resolution_id: Uuid, kind: DemandEventKind) -> DemandEvent;
    /// Lista eventos de una resolución (orden ascendente por seq).
    fn list(&self, resolution_id: Uuid) -> Vec<DemandEvent>;
}

/// No guarda nada. Es la traza por defecto del engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDemandTrace;

impl DemandTrace for NoopDemandTrace {
    fn append_kind(&self, resolution_id: Uuid, kind: DemandEventKind) -> DemandEvent {
        DemandEvent { seq: 0,
                      resolution_id,
                      kind,
                      ts: Utc::now() }
    }

    fn list(&self, _resolution_id: Uuid) -> Vec<DemandEvent> {
        Vec::new()
    }
}

#[derive(Debug, Default)]
pub struct InMemoryDemandTrace {
    inner: Mutex<HashMap<Uuid, Vec<DemandEvent>>>,
}

impl InMemoryDemandTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths de los soft-miss registrados para una resolución.
    pub fn misses(&self, resolution_id: Uuid) -> Vec<String> {
        self.list(resolution_id)
            .into_iter()
            .filter_map(|e| match e.kind {
                DemandEventKind::SupplierMissing { path, .. } => Some(path),
                _ => None,
            })
            .collect()
    }

    /// Saca los eventos de una resolución y los devuelve. Un engine de vida
    /// larga debe llamarlo al terminar cada corrida o la traza sólo crece.
    pub fn clear(&self, resolution_id: Uuid) -> Vec<DemandEvent> {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        guard.remove(&resolution_id).unwrap_or_default()
    }

    /// Resoluciones con al menos un evento.
    pub fn resolutions(&self) -> Vec<Uuid> {
        let guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        guard.keys().copied().collect()
    }
}

impl DemandTrace for InMemoryDemandTrace {
    fn append_kind(&self, resolution_id: Uuid, kind: DemandEventKind) -> DemandEvent {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let vec = guard.entry(resolution_id).or_default();
        let seq = vec.len() as u64;
        let ev = DemandEvent { seq,
                               resolution_id,
                               kind,
                               ts: Utc::now() };
        vec.push(ev.clone());
        ev
    }

    fn list(&self, resolution_id: Uuid) -> Vec<DemandEvent> {
        let guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        guard.get(&resolution_id).cloned().unwrap_or_default()
    }
}
