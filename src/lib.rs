//! SupplyDemand Rust Library
//!
//! Fachada sobre `demand-core`:
//! - Re-exporta el mecanismo (registro, scope, resolver, engine, traza).
//! - Expone `config` para cargar la configuración del resolver desde el entorno.
//! - Expone `errors` con el error de aplicación (`CoreError`).

pub mod config;
pub mod errors;

pub use demand_core::{child_path, from_fn, merge_suppliers, resolve_demand, supply_demand, DemandError, DemandEvent,
                      DemandEventKind, DemandRequest, DemandReturn, DemandSpec, DemandTrace, EngineConfig,
                      InMemoryDemandTrace, NoopDemandTrace, Scope, ScopedDemand, Supplier, SupplierRegistry,
                      SuppliersMerge, SupplyDemand, SupplyDemandBuilder, ROOT_KEY, ROOT_PATH, ROOT_TYPE};

use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use config::ResolverConfig;
use errors::CoreError;

/// Resultado de una corrida lanzada desde la fachada.
#[derive(Debug)]
pub struct Resolution {
    pub resolution_id: Uuid,
    pub value: Option<Value>,
    /// Presente sólo si la configuración activa la traza.
    pub trace: Option<Arc<InMemoryDemandTrace>>,
}

impl Resolution {
    /// Paths de los soft-miss de esta corrida; vacío si no hay traza.
    pub fn misses(&self) -> Vec<String> {
        self.trace.as_ref().map(|t| t.misses(self.resolution_id)).unwrap_or_default()
    }

    /// Eventos de esta corrida; vacío si no hay traza.
    pub fn events(&self) -> Vec<DemandEvent> {
        self.trace.as_ref().map(|t| t.list(self.resolution_id)).unwrap_or_default()
    }
}

/// Resuelve con una configuración ya cargada.
pub async fn supply_demand_with_config<S>(cfg: &ResolverConfig, root: S, suppliers: &SupplierRegistry) -> Result<Resolution, CoreError>
    where S: Supplier + 'static
{
    let (engine, trace) = cfg.build_engine();
    let resolution_id = Uuid::new_v4();
    let value = engine.run_with_id(resolution_id, root, suppliers).await?;
    Ok(Resolution { resolution_id,
                    value,
                    trace })
}

/// Resuelve con la configuración del entorno (`ResolverConfig::from_env`).
pub async fn supply_demand_from_env<S>(root: S, suppliers: &SupplierRegistry) -> Result<Resolution, CoreError>
    where S: Supplier + 'static
{
    let cfg = ResolverConfig::from_env()?;
    supply_demand_with_config(&cfg, root, suppliers).await
}
