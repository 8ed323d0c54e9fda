//! Builder para `SupplyDemand`.
//!
//! ```ignore
//! let trace = Arc::new(InMemoryDemandTrace::new());
//! let engine = SupplyDemand::builder()
//!     .max_depth(64)
//!     .trace(trace.clone())
//!     .build();
//! ```

use std::sync::Arc;

use crate::engine::{EngineConfig, SupplyDemand};
use crate::event::{DemandTrace, NoopDemandTrace};

pub struct SupplyDemandBuilder {
    config: EngineConfig,
    trace: Arc<dyn DemandTrace>,
}

impl Default for SupplyDemandBuilder {
    fn default() -> Self {
        Self { config: EngineConfig::default(),
               trace: Arc::new(NoopDemandTrace) }
    }
}

impl SupplyDemandBuilder {
    /// Reemplaza la configuración completa.
    #[inline]
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = Some(max_depth);
        self
    }

    /// Traza compartida por todas las resoluciones del engine.
    #[inline]
    pub fn trace(mut self, trace: Arc<dyn DemandTrace>) -> Self {
        self.trace = trace;
        self
    }

    #[inline]
    pub fn build(self) -> SupplyDemand {
        SupplyDemand::new(self.config, self.trace)
    }
}
