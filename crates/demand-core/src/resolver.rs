//! Demand Resolver: valida una `DemandRequest`, busca el supplier del tipo y
//! lo invoca con un `Scope` nuevo.
//!
//! Un tipo sin supplier no es error: devuelve `Ok(None)` y queda registrado
//! como soft-miss (log + traza). No hay reintentos ni búsqueda alternativa.

use std::sync::Arc;

use log::{debug, warn};
use serde_json::Value;
use uuid::Uuid;

use crate::engine::EngineConfig;
use crate::errors::DemandError;
use crate::event::{DemandEventKind, DemandTrace, NoopDemandTrace};
use crate::registry::SupplierRegistry;
use crate::scope::{Scope, ScopedDemand};
use crate::DemandReturn;

/// Request de resolución. Transitoria: vive lo que dura una llamada.
#[derive(Clone, Debug)]
pub struct DemandRequest {
    pub key: String,
    pub type_name: String,
    pub path: String,
    pub data: Option<Value>,
    pub suppliers: SupplierRegistry,
}

impl DemandRequest {
    pub fn new(key: impl Into<String>, type_name: impl Into<String>, path: impl Into<String>, suppliers: SupplierRegistry) -> Self {
        Self { key: key.into(),
               type_name: type_name.into(),
               path: path.into(),
               data: None,
               suppliers }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// `key`, `type_name` y `path` deben ser no vacíos.
    pub fn validate(&self) -> Result<(), DemandError> {
        let mut missing = Vec::new();
        if self.key.is_empty() {
            missing.push("key");
        }
        if self.type_name.is_empty() {
            missing.push("type");
        }
        if self.path.is_empty() {
            missing.push("path");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(DemandError::Validation(format!("{} required in demand", missing.join(", "))))
        }
    }
}

/// Estado compartido por todos los nodos de un mismo árbol de resolución.
pub(crate) struct ResolutionContext {
    pub(crate) resolution_id: Uuid,
    pub(crate) config: EngineConfig,
    pub(crate) trace: Arc<dyn DemandTrace>,
}

impl ResolutionContext {
    pub(crate) fn new(resolution_id: Uuid, config: EngineConfig, trace: Arc<dyn DemandTrace>) -> Self {
        Self { resolution_id,
               config,
               trace }
    }

    /// Contexto sin traza ni límite de profundidad.
    pub(crate) fn detached() -> Self {
        Self::new(Uuid::new_v4(), EngineConfig::default(), Arc::new(NoopDemandTrace))
    }

    #[inline]
    pub(crate) fn record(&self, kind: DemandEventKind) {
        self.trace.append_kind(self.resolution_id, kind);
    }
}

/// Resuelve una request construida a mano, fuera de cualquier engine.
pub async fn resolve_demand(request: DemandRequest) -> DemandReturn {
    resolve_in(Arc::new(ResolutionContext::detached()), request, 0).await
}

pub(crate) async fn resolve_in(ctx: Arc<ResolutionContext>, request: DemandRequest, depth: usize) -> DemandReturn {
    if let Err(e) = request.validate() {
        ctx.record(DemandEventKind::DemandFailed { path: request.path,
                                                   error: e.clone() });
        return Err(e);
    }

    let DemandRequest { key, type_name, path, data, suppliers } = request;
    debug!("[demand {}] key={} type={} path={}", ctx.resolution_id, key, type_name, path);
    ctx.record(DemandEventKind::DemandIssued { key: key.clone(),
                                               type_name: type_name.clone(),
                                               path: path.clone(),
                                               depth });

    if let Some(max_depth) = ctx.config.max_depth {
        if depth > max_depth {
            let e = DemandError::DepthExceeded { path: path.clone(),
                                                 max_depth };
            ctx.record(DemandEventKind::DemandFailed { path,
                                                       error: e.clone() });
            return Err(e);
        }
    }

    let Some(supplier) = suppliers.get(&type_name).cloned() else {
        warn!("[demand {}] supplier not found for type {} at {}", ctx.resolution_id, type_name, path);
        ctx.record(DemandEventKind::SupplierMissing { type_name, path });
        return Ok(None);
    };

    debug!("[demand {}] calling supplier for type {}", ctx.resolution_id, type_name);
    ctx.record(DemandEventKind::SupplierInvoked { type_name: type_name.clone(),
                                                  path: path.clone() });
    let scoped = ScopedDemand::new(key.clone(), path.clone(), suppliers, depth, Arc::clone(&ctx));
    let scope = Scope::new(key, type_name, path.clone(), scoped);

    match supplier.supply(data, scope).await {
        Ok(value) => {
            ctx.record(DemandEventKind::DemandSupplied { path,
                                                         has_value: value.is_some() });
            Ok(value)
        }
        Err(e) => {
            ctx.record(DemandEventKind::DemandFailed { path,
                                                       error: e.clone() });
            Err(e)
        }
    }
}
