//! Errores de la aplicación. Los errores del mecanismo viven en
//! `demand_core::DemandError` y se envuelven en `CoreError::Demand`.

pub mod core_error;

pub use core_error::CoreError;
