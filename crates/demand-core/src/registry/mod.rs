//! Registro de suppliers (tipo -> supplier) y su derivación por merge.

mod merge;
mod supplier;

pub use merge::{merge_suppliers, SuppliersMerge};
pub use supplier::{from_fn, Supplier, SupplierRegistry};
