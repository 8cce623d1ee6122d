use rust_xlsxwriter::{Workbook, XlsxError};
use std::collections::BTreeSet;
use std::path::Path;

use crate::error::CatalogoError;
use crate::excel::consolidado::COLUMNAS_REQUERIDAS;
use crate::models::FilaCatalogo;

/// Arma el workbook: columnas requeridas primero, luego las columnas extra
/// (unión de todas las filas, en orden alfabético).
fn construir_workbook(filas: &[FilaCatalogo]) -> Result<Workbook, XlsxError> {
    let extras: BTreeSet<&str> = filas.iter().flat_map(|f| f.extra.keys().map(String::as_str)).collect();

    let mut workbook = Workbook::new();
    let hoja = workbook.add_worksheet();
    hoja.set_name("consolidado")?;

    let mut col: u16 = 0;
    for nombre in COLUMNAS_REQUERIDAS.iter().copied().chain(extras.iter().copied()) {
        hoja.write_string(0, col, nombre)?;
        col += 1;
    }

    for (i, fila) in filas.iter().enumerate() {
        let row = (i + 1) as u32;
        hoja.write_string(row, 0, &fila.asig_codigo)?;
        hoja.write_string(row, 1, &fila.asig_nombre)?;
        hoja.write_number(row, 2, fila.psec_codigo as f64)?;
        hoja.write_number(row, 3, fila.pgru_codigo as f64)?;
        hoja.write_string(row, 4, &fila.sdia_descripcion)?;
        hoja.write_string(row, 5, &fila.sper_hora_ini)?;
        hoja.write_string(row, 6, &fila.sper_hora_fin)?;
        hoja.write_string(row, 7, &fila.camp_campus)?;
        for (j, nombre) in extras.iter().enumerate() {
            if let Some(v) = fila.extra.get(*nombre) {
                if !v.is_empty() {
                    hoja.write_string(row, (COLUMNAS_REQUERIDAS.len() + j) as u16, v)?;
                }
            }
        }
    }
    Ok(workbook)
}

/// Escribe el consolidado en `path` (sobrescribe).
pub fn escribir_consolidado<P: AsRef<Path>>(filas: &[FilaCatalogo], path: P) -> Result<(), CatalogoError> {
    let mut workbook = construir_workbook(filas)?;
    workbook.save(path.as_ref())?;
    Ok(())
}

/// Consolidado como bytes xlsx, para descargas.
pub fn consolidado_a_bytes(filas: &[FilaCatalogo]) -> Result<Vec<u8>, CatalogoError> {
    let mut workbook = construir_workbook(filas)?;
    Ok(workbook.save_to_buffer()?)
}
