//! Traza de eventos de resolución y trait `DemandTrace`.

mod store;
mod types;

pub use store::{DemandTrace, InMemoryDemandTrace, NoopDemandTrace};
pub use types::{DemandEvent, DemandEventKind};
