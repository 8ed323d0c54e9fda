//! Engine module: `SupplyDemand`, su builder y el entrypoint `supply_demand`.

pub mod builder;
pub mod core;

pub use builder::SupplyDemandBuilder;
pub use self::core::{supply_demand, SupplyDemand};

/// Parámetros del engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Profundidad máxima de anidamiento (raíz = 0). `None` = sin límite:
    /// un supplier que se demanda a sí mismo recursa hasta agotar recursos.
    pub max_depth: Option<usize>,
}
