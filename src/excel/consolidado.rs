use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use log::info;
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use crate::error::CatalogoError;
use crate::excel::io::{celda_entero, celda_hora, cell_to_string, normalize_header};
use crate::models::FilaCatalogo;

/// Columnas que el consolidado debe traer sí o sí.
pub const COLUMNAS_REQUERIDAS: [&str; 8] = [
    "asig_codigo",
    "asig_nombre",
    "psec_codigo",
    "pgru_codigo",
    "sdia_descripcion",
    "sper_hora_ini",
    "sper_hora_fin",
    "camp_campus",
];

/// Columnas requeridas que no aparecen entre `encabezados`.
pub fn columnas_faltantes(encabezados: &[String]) -> Vec<String> {
    let normalizados: Vec<String> = encabezados.iter().map(|h| normalize_header(h)).collect();
    COLUMNAS_REQUERIDAS
        .iter()
        .filter(|c| !normalizados.iter().any(|h| h == *c))
        .map(|c| c.to_string())
        .collect()
}

/// Lee el consolidado desde disco (xlsx o xls).
pub fn leer_consolidado_excel<P: AsRef<Path>>(path: P) -> Result<Vec<FilaCatalogo>, CatalogoError> {
    let workbook = open_workbook_auto(path.as_ref())?;
    let filas = leer_primera_hoja(workbook)?;
    info!("consolidado {:?}: {} registros", path.as_ref(), filas.len());
    Ok(filas)
}

/// Lee un consolidado subido por el usuario (contenido completo del archivo).
pub fn leer_consolidado_desde_bytes(bytes: Vec<u8>) -> Result<Vec<FilaCatalogo>, CatalogoError> {
    let workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    leer_primera_hoja(workbook)
}

fn leer_primera_hoja<RS: Read + Seek>(mut workbook: Sheets<RS>) -> Result<Vec<FilaCatalogo>, CatalogoError> {
    let hoja = workbook.sheet_names().first().cloned().ok_or(CatalogoError::SinHojas)?;
    let range = workbook.worksheet_range(&hoja)?;
    filas_desde_rango(&range)
}

/// Convierte la hoja en filas limpias: descarta filas sin `asig_codigo`,
/// recorta textos, pasa el campus a mayúsculas y usa 1 como sección/grupo
/// por defecto.
pub fn filas_desde_rango(range: &Range<Data>) -> Result<Vec<FilaCatalogo>, CatalogoError> {
    let mut rows = range.rows();
    let encabezados: Vec<String> = match rows.next() {
        Some(r) => r.iter().map(cell_to_string).collect(),
        None => Vec::new(),
    };

    let faltantes = columnas_faltantes(&encabezados);
    if !faltantes.is_empty() {
        return Err(CatalogoError::ColumnasFaltantes(faltantes));
    }

    let normalizados: Vec<String> = encabezados.iter().map(|h| normalize_header(h)).collect();
    let idx = |nombre: &str| normalizados.iter().position(|h| h == nombre).unwrap_or(usize::MAX);
    let i_codigo = idx("asig_codigo");
    let i_nombre = idx("asig_nombre");
    let i_sec = idx("psec_codigo");
    let i_grp = idx("pgru_codigo");
    let i_dia = idx("sdia_descripcion");
    let i_ini = idx("sper_hora_ini");
    let i_fin = idx("sper_hora_fin");
    let i_campus = idx("camp_campus");
    let requeridos = [i_codigo, i_nombre, i_sec, i_grp, i_dia, i_ini, i_fin, i_campus];

    let vacio = Data::Empty;
    let mut filas = Vec::new();
    for row in rows {
        let celda = |i: usize| row.get(i).unwrap_or(&vacio);

        let asig_codigo = cell_to_string(celda(i_codigo));
        if asig_codigo.is_empty() {
            continue;
        }

        let mut extra = BTreeMap::new();
        for (i, encabezado) in encabezados.iter().enumerate() {
            if requeridos.contains(&i) || encabezado.is_empty() {
                continue;
            }
            extra.insert(encabezado.clone(), cell_to_string(celda(i)));
        }

        filas.push(FilaCatalogo {
            asig_codigo,
            asig_nombre: cell_to_string(celda(i_nombre)),
            psec_codigo: celda_entero(celda(i_sec), 1),
            pgru_codigo: celda_entero(celda(i_grp), 1),
            sdia_descripcion: cell_to_string(celda(i_dia)),
            sper_hora_ini: celda_hora(celda(i_ini)),
            sper_hora_fin: celda_hora(celda(i_fin)),
            camp_campus: cell_to_string(celda(i_campus)).to_uppercase(),
            extra,
        });
    }
    Ok(filas)
}

fn valor_a_texto(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

fn valor_a_entero(v: Option<&Value>, defecto: i64) -> i64 {
    match v {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)).unwrap_or(defecto),
        Some(Value::String(s)) => {
            let t = s.trim();
            t.parse::<i64>()
                .ok()
                .or_else(|| t.parse::<f64>().ok().map(|f| f as i64))
                .unwrap_or(defecto)
        }
        _ => defecto,
    }
}

/// Fila editada en el frontend (objeto JSON con las columnas del consolidado).
/// Aplica la misma limpieza que la lectura del Excel; `None` si no trae código.
pub fn fila_desde_json(obj: &serde_json::Map<String, Value>) -> Option<FilaCatalogo> {
    let texto = |k: &str| obj.get(k).map(valor_a_texto).unwrap_or_default();
    let asig_codigo = texto("asig_codigo");
    if asig_codigo.is_empty() {
        return None;
    }
    let extra = obj
        .iter()
        .filter(|(k, _)| !COLUMNAS_REQUERIDAS.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), valor_a_texto(v)))
        .collect();
    Some(FilaCatalogo {
        asig_codigo,
        asig_nombre: texto("asig_nombre"),
        psec_codigo: valor_a_entero(obj.get("psec_codigo"), 1),
        pgru_codigo: valor_a_entero(obj.get("pgru_codigo"), 1),
        sdia_descripcion: texto("sdia_descripcion"),
        sper_hora_ini: texto("sper_hora_ini"),
        sper_hora_fin: texto("sper_hora_fin"),
        camp_campus: texto("camp_campus").to_uppercase(),
        extra,
    })
}
