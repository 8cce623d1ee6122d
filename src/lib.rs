// Biblioteca raíz del crate `quickshift_horarios`.
// Generador de combinaciones de horarios con detección de topones y
// tiempos de traslado entre campus.
pub mod models;
pub mod error;
pub mod algorithm;
pub mod catalogo;
pub mod config;
pub mod excel;
pub mod api_json;
pub mod server;

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
