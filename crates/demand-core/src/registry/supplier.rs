//! Contrato `Supplier` y el mapa `SupplierRegistry`.
//!
//! Un supplier produce el valor de un tipo. Recibe los datos opcionales de la
//! demanda y un `Scope` propio desde el cual puede emitir demandas anidadas.
//! Todo supplier es asíncrono: uno que responde de inmediato simplemente no
//! suspende, así que ambos casos cumplen el mismo contrato.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;

use super::merge::{merge_suppliers, SuppliersMerge};
use crate::scope::Scope;
use crate::DemandReturn;

/// Trait para suppliers de un tipo.
#[async_trait]
pub trait Supplier: Send + Sync {
    /// Produce el valor. `Ok(None)` es un resultado válido ("sin valor").
    async fn supply(&self, data: Option<Value>, scope: Scope) -> DemandReturn;
}

/// Cualquier `Fn(data, scope) -> Future` es un supplier, incluidos los `async fn`.
#[async_trait]
impl<F, Fut> Supplier for F
    where F: Fn(Option<Value>, Scope) -> Fut + Send + Sync,
          Fut: Future<Output = DemandReturn> + Send + 'static
{
    async fn supply(&self, data: Option<Value>, scope: Scope) -> DemandReturn {
        (self)(data, scope).await
    }
}

/// Envuelve un closure como `Arc<dyn Supplier>`.
///
/// Útil para closures que capturan estado: los bounds explícitos permiten
/// inferir la firma del closure y el tipo de salida del bloque `async`.
pub fn from_fn<F, Fut>(f: F) -> Arc<dyn Supplier>
    where F: Fn(Option<Value>, Scope) -> Fut + Send + Sync + 'static,
          Fut: Future<Output = DemandReturn> + Send + 'static
{
    Arc::new(f)
}

/// Mapa tipo -> supplier con orden de inserción estable.
///
/// Clonar copia sólo los `Arc`; cada scope hijo recibe su propia copia y la
/// del padre nunca se muta.
#[derive(Clone, Default)]
pub struct SupplierRegistry {
    inner: IndexMap<String, Arc<dyn Supplier>>,
}

impl SupplierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Variante encadenable de `insert`.
    pub fn with(mut self, type_name: impl Into<String>, supplier: impl Supplier + 'static) -> Self {
        self.insert(type_name, supplier);
        self
    }

    pub fn with_arc(mut self, type_name: impl Into<String>, supplier: Arc<dyn Supplier>) -> Self {
        self.insert_arc(type_name, supplier);
        self
    }

    /// Registra (o reemplaza) el supplier de `type_name`.
    pub fn insert(&mut self, type_name: impl Into<String>, supplier: impl Supplier + 'static) -> Option<Arc<dyn Supplier>> {
        self.insert_arc(type_name, Arc::new(supplier))
    }

    pub fn insert_arc(&mut self, type_name: impl Into<String>, supplier: Arc<dyn Supplier>) -> Option<Arc<dyn Supplier>> {
        self.inner.insert(type_name.into(), supplier)
    }

    /// Quita el supplier de `type_name`; ausente no es error.
    pub fn remove(&mut self, type_name: &str) -> Option<Arc<dyn Supplier>> {
        self.inner.shift_remove(type_name)
    }

    #[inline]
    pub fn get(&self, type_name: &str) -> Option<&Arc<dyn Supplier>> {
        self.inner.get(type_name)
    }

    #[inline]
    pub fn contains(&self, type_name: &str) -> bool {
        self.inner.contains_key(type_name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Tipos registrados, en orden de inserción.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn Supplier>)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Deriva un registro nuevo aplicando `op`; `self` queda intacto.
    pub fn merged(&self, op: &SuppliersMerge) -> Self {
        merge_suppliers(self, op)
    }
}

impl fmt::Debug for SupplierRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupplierRegistry")
         .field("types", &self.types().collect::<Vec<_>>())
         .finish()
    }
}
