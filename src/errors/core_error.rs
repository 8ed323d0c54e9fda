use demand_core::DemandError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Error de demanda: {0}")]
    Demand(#[from] DemandError),
}
