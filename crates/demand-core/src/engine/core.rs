//! Entrypoint de resolución.
//!
//! Copia el registro del caller, inyecta el supplier raíz bajo `ROOT_TYPE` y
//! emite la demanda raíz. Cada `run` es un árbol independiente con su propio
//! `resolution_id`; los árboles no comparten estado mutable salvo la traza.

use std::fmt;
use std::sync::Arc;

use log::debug;
use uuid::Uuid;

use crate::constants::{ROOT_KEY, ROOT_PATH, ROOT_TYPE};
use crate::engine::{EngineConfig, SupplyDemandBuilder};
use crate::event::DemandTrace;
use crate::registry::{Supplier, SupplierRegistry};
use crate::resolver::{resolve_in, DemandRequest, ResolutionContext};
use crate::DemandReturn;

#[derive(Clone)]
pub struct SupplyDemand {
    config: EngineConfig,
    trace: Arc<dyn DemandTrace>,
}

impl Default for SupplyDemand {
    fn default() -> Self {
        SupplyDemandBuilder::default().build()
    }
}

impl SupplyDemand {
    #[inline]
    pub fn builder() -> SupplyDemandBuilder {
        SupplyDemandBuilder::default()
    }

    pub fn new(config: EngineConfig, trace: Arc<dyn DemandTrace>) -> Self {
        Self { config, trace }
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn trace(&self) -> &Arc<dyn DemandTrace> {
        &self.trace
    }

    /// Resuelve un árbol completo con un `resolution_id` nuevo.
    pub async fn run<S>(&self, root: S, suppliers: &SupplierRegistry) -> DemandReturn
        where S: Supplier + 'static
    {
        self.run_with_id(Uuid::new_v4(), root, suppliers).await
    }

    /// Igual que `run` pero con un `resolution_id` elegido por el caller,
    /// para consultar la traza después.
    pub async fn run_with_id<S>(&self, resolution_id: Uuid, root: S, suppliers: &SupplierRegistry) -> DemandReturn
        where S: Supplier + 'static
    {
        self.run_shared(resolution_id, Arc::new(root), suppliers).await
    }

    /// Variante para un supplier raíz ya compartido (p.ej. salido de `from_fn`).
    pub async fn run_shared(&self, resolution_id: Uuid, root: Arc<dyn Supplier>, suppliers: &SupplierRegistry) -> DemandReturn {
        // Un `$$root` del caller queda pisado.
        let suppliers = suppliers.clone().with_arc(ROOT_TYPE, root);
        debug!("[demand {}] supply_demand with types {:?}", resolution_id, suppliers.types().collect::<Vec<_>>());
        let ctx = Arc::new(ResolutionContext::new(resolution_id, self.config.clone(), Arc::clone(&self.trace)));
        resolve_in(ctx, DemandRequest::new(ROOT_KEY, ROOT_TYPE, ROOT_PATH, suppliers), 0).await
    }
}

impl fmt::Debug for SupplyDemand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupplyDemand").field("config", &self.config).finish()
    }
}

/// Resuelve con un engine por defecto: sin traza y sin límite de profundidad.
pub async fn supply_demand<S>(root: S, suppliers: &SupplierRegistry) -> DemandReturn
    where S: Supplier + 'static
{
    SupplyDemand::default().run(root, suppliers).await
}
