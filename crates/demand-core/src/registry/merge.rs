//! Derivación determinista del registro de un scope hijo.
//!
//! Orden fijo: clear -> add -> remove. Un tipo presente en `add` y en
//! `remove` termina removido.

use std::collections::HashSet;
use std::sync::Arc;

use super::supplier::{Supplier, SupplierRegistry};

/// Directiva de merge aplicada sobre el registro del padre.
#[derive(Clone, Debug, Default)]
pub struct SuppliersMerge {
    /// Parte de un registro vacío en lugar de una copia del padre.
    pub clear: bool,
    /// Entradas añadidas; pisan las del padre con el mismo tipo.
    pub add: SupplierRegistry,
    /// Tipos removidos al final. Los ausentes se ignoran.
    pub remove: HashSet<String>,
}

impl SuppliersMerge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(mut self) -> Self {
        self.clear = true;
        self
    }

    pub fn add(mut self, type_name: impl Into<String>, supplier: impl Supplier + 'static) -> Self {
        self.add.insert(type_name, supplier);
        self
    }

    pub fn add_arc(mut self, type_name: impl Into<String>, supplier: Arc<dyn Supplier>) -> Self {
        self.add.insert_arc(type_name, supplier);
        self
    }

    pub fn remove(mut self, type_name: impl Into<String>) -> Self {
        self.remove.insert(type_name.into());
        self
    }

    /// `true` si aplicar la directiva devuelve una copia idéntica del padre.
    pub fn is_identity(&self) -> bool {
        !self.clear && self.add.is_empty() && self.remove.is_empty()
    }
}

/// Produce un registro nuevo a partir de `base` y `op`. Ninguno de los dos se muta.
pub fn merge_suppliers(base: &SupplierRegistry, op: &SuppliersMerge) -> SupplierRegistry {
    let mut merged = if op.clear { SupplierRegistry::new() } else { base.clone() };
    for (type_name, supplier) in op.add.iter() {
        merged.insert_arc(type_name, Arc::clone(supplier));
    }
    for type_name in op.remove.iter() {
        merged.remove(type_name);
    }
    merged
}
