//! `Scope` entregado a cada supplier y la fábrica de demandas anidadas.
//!
//! `ScopedDemand` es la única vía de recursión: cierra sobre la request del
//! padre (key, path, registro ya mergeado) y, por cada demanda anidada,
//! construye la `DemandRequest` hija y la reenvía al resolver.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use crate::constants::ROOT_TYPE;
use crate::errors::DemandError;
use crate::event::DemandEventKind;
use crate::registry::{merge_suppliers, SupplierRegistry, SuppliersMerge};
use crate::resolver::{resolve_in, DemandRequest, ResolutionContext};
use crate::DemandReturn;

/// Compone el path de un hijo: `parent/key(type)`.
#[inline]
pub fn child_path(parent_path: &str, key: &str, type_name: &str) -> String {
    format!("{parent_path}/{key}({type_name})")
}

/// Demanda emitida desde dentro de un supplier.
#[derive(Clone, Debug, Default)]
pub struct DemandSpec {
    /// Si falta, se hereda la key del padre.
    pub key: Option<String>,
    /// Obligatorio; su ausencia es un error de validación. `ROOT_TYPE` no
    /// se puede demandar desde un scope.
    pub type_name: Option<String>,
    pub data: Option<Value>,
    pub suppliers_merge: Option<SuppliersMerge>,
}

impl DemandSpec {
    pub fn of_type(type_name: impl Into<String>) -> Self {
        Self { type_name: Some(type_name.into()),
               ..Self::default() }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn suppliers_merge(mut self, op: SuppliersMerge) -> Self {
        self.suppliers_merge = Some(op);
        self
    }
}

/// Callback de demanda anidada, ligado a un frame de resolución.
#[derive(Clone)]
pub struct ScopedDemand {
    parent_key: String,
    parent_path: String,
    suppliers: SupplierRegistry,
    depth: usize,
    ctx: Arc<ResolutionContext>,
}

impl ScopedDemand {
    pub(crate) fn new(parent_key: String,
                      parent_path: String,
                      suppliers: SupplierRegistry,
                      depth: usize,
                      ctx: Arc<ResolutionContext>)
                      -> Self {
        Self { parent_key,
               parent_path,
               suppliers,
               depth,
               ctx }
    }

    /// Emite una demanda hija y espera todo su subárbol.
    pub async fn demand(&self, spec: DemandSpec) -> DemandReturn {
        let request = match self.child_request(spec) {
            Ok(request) => request,
            Err(e) => {
                self.ctx.record(DemandEventKind::DemandFailed { path: self.parent_path.clone(),
                                                                error: e.clone() });
                return Err(e);
            }
        };
        resolve_in(Arc::clone(&self.ctx), request, self.depth + 1).await
    }

    fn child_request(&self, spec: DemandSpec) -> Result<DemandRequest, DemandError> {
        let DemandSpec { key, type_name, data, suppliers_merge } = spec;
        let type_name = type_name.ok_or_else(|| DemandError::Validation("type is required in scoped demand".into()))?;
        if type_name == ROOT_TYPE {
            return Err(DemandError::Validation(format!("{ROOT_TYPE} is reserved for the root demand")));
        }
        let key = key.unwrap_or_else(|| self.parent_key.clone());
        let path = child_path(&self.parent_path, &key, &type_name);
        let suppliers = match suppliers_merge {
            Some(op) => merge_suppliers(&self.suppliers, &op),
            None => self.suppliers.clone(),
        };
        Ok(DemandRequest { key,
                           type_name,
                           path,
                           data,
                           suppliers })
    }
}

impl fmt::Debug for ScopedDemand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedDemand")
         .field("parent_key", &self.parent_key)
         .field("parent_path", &self.parent_path)
         .field("suppliers", &self.suppliers)
         .field("depth", &self.depth)
         .finish()
    }
}

/// Contexto inmutable de una invocación de supplier.
///
/// Se crea uno por invocación y se entrega por valor; no es `Clone`.
#[derive(Debug)]
pub struct Scope {
    key: String,
    type_name: String,
    path: String,
    demand: ScopedDemand,
}

impl Scope {
    pub(crate) fn new(key: String, type_name: String, path: String, demand: ScopedDemand) -> Self {
        Self { key,
               type_name,
               path,
               demand }
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.demand.depth
    }

    #[inline]
    pub fn resolution_id(&self) -> Uuid {
        self.demand.ctx.resolution_id
    }

    /// Handle clonable para lanzar demandas hijas concurrentes.
    pub fn scoped_demand(&self) -> &ScopedDemand {
        &self.demand
    }

    pub async fn demand(&self, spec: DemandSpec) -> DemandReturn {
        self.demand.demand(spec).await
    }
}
