//! Configuración del resolver desde variables de entorno (.env incluido).
//!
//! - `SUPPLY_DEMAND_MAX_DEPTH`: profundidad máxima de anidamiento. Vacío,
//!   ausente o `none` = sin límite.
//! - `SUPPLY_DEMAND_TRACE`: `1/true/yes/on` activa una traza en memoria.
use std::env;
use std::sync::Arc;

use demand_core::{EngineConfig, InMemoryDemandTrace, SupplyDemand};
use dotenvy::dotenv;
use log::debug;
use once_cell::sync::Lazy;

use crate::errors::CoreError;

pub const MAX_DEPTH_VAR: &str = "SUPPLY_DEMAND_MAX_DEPTH";
pub const TRACE_VAR: &str = "SUPPLY_DEMAND_TRACE";

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverConfig {
    pub max_depth: Option<usize>,
    pub trace: bool,
}

impl ResolverConfig {
    pub fn from_env() -> Result<Self, CoreError> {
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|k| env::var(k).ok())
    }

    /// Igual que `from_env` pero leyendo de cualquier fuente clave -> valor.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
        where F: Fn(&str) -> Option<String>
    {
        let max_depth = match lookup(MAX_DEPTH_VAR).as_deref().map(str::trim) {
            None | Some("") => None,
            Some(v) if v.eq_ignore_ascii_case("none") => None,
            Some(v) => Some(v.parse::<usize>()
                             .map_err(|e| CoreError::Config(format!("{MAX_DEPTH_VAR}={v:?}: {e}")))?),
        };
        let trace = match lookup(TRACE_VAR) {
            None => false,
            Some(v) => parse_flag(&v).ok_or_else(|| CoreError::Config(format!("{TRACE_VAR}={v:?}: expected a boolean flag")))?,
        };
        debug!("[config] max_depth={max_depth:?} trace={trace}");
        Ok(Self { max_depth, trace })
    }

    #[inline]
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig { max_depth: self.max_depth }
    }

    /// Construye el engine; si la traza está activa devuelve también su handle.
    pub fn build_engine(&self) -> (SupplyDemand, Option<Arc<InMemoryDemandTrace>>) {
        let builder = SupplyDemand::builder().config(self.engine_config());
        if self.trace {
            let trace = Arc::new(InMemoryDemandTrace::new());
            (builder.trace(trace.clone()).build(), Some(trace))
        } else {
            (builder.build(), None)
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn flags_parse() {
        assert_eq!(parse_flag(" On "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = ResolverConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, ResolverConfig::default());
        assert_eq!(cfg.engine_config(), EngineConfig::default());
    }

    #[test]
    fn none_means_unbounded() {
        let cfg = ResolverConfig::from_lookup(lookup(&[(MAX_DEPTH_VAR, "None")])).unwrap();
        assert_eq!(cfg.max_depth, None);
    }
}
