//! Constantes del mecanismo de resolución.
//!
//! La demanda raíz es la única que usa `ROOT_TYPE`; el entrypoint la inyecta
//! en una copia del registro del caller y nunca debe aparecer en un registro
//! construido a mano.

/// Key de la demanda raíz.
pub const ROOT_KEY: &str = "root";

/// Tipo reservado bajo el cual se registra el supplier raíz.
pub const ROOT_TYPE: &str = "$$root";

/// Path de la demanda raíz. Todos los paths anidados extienden este prefijo.
pub const ROOT_PATH: &str = "root";
