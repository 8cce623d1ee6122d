//! Tipos de error del crate.

use thiserror::Error;

/// Fallas visibles de la generación de horarios. Cualquier otra
/// irregularidad (horas mal formadas, reglas inválidas) se degrada sin error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneracionError {
    #[error("Selecciona al menos un curso")]
    SeleccionVacia,
    #[error("No hay datos en el catálogo para el curso {curso}")]
    SinDatosCatalogo { curso: String },
}

/// Errores al leer o escribir el consolidado.
#[derive(Debug, Error)]
pub enum CatalogoError {
    #[error("error de lectura Excel: {0}")]
    Excel(#[from] calamine::Error),
    #[error("error de escritura Excel: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("error de IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Faltan columnas requeridas: {}", .0.join(", "))]
    ColumnasFaltantes(Vec<String>),
    #[error("el archivo no contiene hojas")]
    SinHojas,
}

/// Solicitud de generación rechazada en el borde HTTP.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolicitudError {
    #[error("Selecciona al menos un curso")]
    SinCursos,
    #[error("Máximo {max} cursos permitidos")]
    DemasiadosCursos { max: usize, recibidos: usize },
}
