//! Módulo `excel`: lectura y escritura del consolidado de horarios.
//!
//! Submódulos:
//! - `io`: conversión de celdas de calamine
//! - `consolidado`: lectura y limpieza del consolidado (y de filas editadas en JSON)
//! - `escritura`: escritura del consolidado en xlsx

/// Helpers de IO y utilidades para parsing de Excel
mod io;

/// Lectura del consolidado: `leer_consolidado_excel`
pub mod consolidado;

/// Escritura del consolidado: `escribir_consolidado`
pub mod escritura;

pub use consolidado::{
    columnas_faltantes, fila_desde_json, leer_consolidado_desde_bytes, leer_consolidado_excel, COLUMNAS_REQUERIDAS,
};
pub use escritura::{consolidado_a_bytes, escribir_consolidado};

use std::path::Path;

use crate::catalogo::Catalogo;
use crate::error::CatalogoError;

/// Lee el consolidado y arma el catálogo en memoria.
pub fn cargar_catalogo<P: AsRef<Path>>(path: P) -> Result<Catalogo, CatalogoError> {
    let filas = leer_consolidado_excel(path)?;
    Ok(Catalogo::new(filas))
}
