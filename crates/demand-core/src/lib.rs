//! demand-core: resolución recursiva de demandas tipadas por path.
//!
//! Un caller demanda un tipo; el supplier registrado produce el valor y
//! recibe un `Scope` desde el que puede emitir demandas anidadas contra un
//! registro que puede extender o restringir (`SuppliersMerge`).
pub mod constants;
pub mod engine;
pub mod errors;
pub mod event;
pub mod registry;
pub mod resolver;
pub mod scope;

pub use constants::{ROOT_KEY, ROOT_PATH, ROOT_TYPE};
pub use engine::{supply_demand, EngineConfig, SupplyDemand, SupplyDemandBuilder};
pub use errors::DemandError;
pub use event::{DemandEvent, DemandEventKind, DemandTrace, InMemoryDemandTrace, NoopDemandTrace};
pub use registry::{from_fn, merge_suppliers, Supplier, SupplierRegistry, SuppliersMerge};
pub use resolver::{resolve_demand, DemandRequest};
pub use scope::{child_path, DemandSpec, Scope, ScopedDemand};

/// Resultado de toda demanda y de todo supplier. `Ok(None)` = sin valor
/// (incluye el soft-miss de un tipo sin supplier).
pub type DemandReturn = Result<Option<serde_json::Value>, DemandError>;
