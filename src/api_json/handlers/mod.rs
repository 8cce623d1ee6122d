pub mod horarios;
pub mod cursos;
pub mod config;
pub mod datos;

pub use horarios::*;
pub use cursos::*;
pub use config::*;
pub use datos::*;
