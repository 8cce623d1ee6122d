use actix_multipart::Multipart;
use actix_web::http::header;
use actix_web::{web, HttpResponse, Responder};
use futures_util::stream::StreamExt;
use log::{error, info, warn};
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::Path;

use crate::catalogo::Catalogo;
use crate::error::CatalogoError;
use crate::excel::{consolidado_a_bytes, escribir_consolidado, fila_desde_json, leer_consolidado_desde_bytes};
use crate::models::FilaCatalogo;
use crate::server::EstadoApp;

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const NOMBRE_EXPORTACION: &str = "consolidado_export.xlsx";

#[derive(Debug, Deserialize)]
pub struct GuardarDatosRequest {
    #[serde(default)]
    pub data: Vec<Value>,
}

/// `true` si el nombre de archivo termina en `.xlsx` o `.xls`.
pub fn es_archivo_excel(nombre: &str) -> bool {
    match Path::new(nombre).extension().and_then(std::ffi::OsStr::to_str) {
        Some(ext) => ext.eq_ignore_ascii_case("xlsx") || ext.eq_ignore_ascii_case("xls"),
        None => false,
    }
}

/// Escribe las filas en el consolidado y publica el nuevo catálogo. La
/// escritura del archivo y el reemplazo del catálogo ocurren bajo el mismo
/// candado, así que el disco y la memoria quedan con las mismas filas.
async fn persistir_y_publicar(estado: &EstadoApp, filas: Vec<FilaCatalogo>) -> Result<usize, String> {
    let _candado = estado.escritura.lock().await;
    let destino = estado.config.consolidado.clone();
    let escritura = tokio::task::spawn_blocking(move || -> Result<Vec<FilaCatalogo>, CatalogoError> {
        escribir_consolidado(&filas, &destino)?;
        Ok(filas)
    })
    .await
    .map_err(|e| format!("task join error: {}", e))?;

    let filas = escritura.map_err(|e| e.to_string())?;
    let total = filas.len();
    estado.catalogo.reemplazar(Catalogo::new(filas));
    info!("consolidado actualizado: {} registros", total);
    Ok(total)
}

/// `GET /api/data/all`
pub async fn datos_todos_handler(estado: web::Data<EstadoApp>) -> impl Responder {
    let catalogo = estado.catalogo.snapshot();
    HttpResponse::Ok().json(json!({
        "success": true,
        "data": catalogo.filas(),
        "total": catalogo.len()
    }))
}

/// `POST /api/data/save`: reemplaza el consolidado por las filas editadas.
pub async fn datos_guardar_handler(
    estado: web::Data<EstadoApp>,
    body: web::Json<GuardarDatosRequest>,
) -> impl Responder {
    let body = body.into_inner();
    if body.data.is_empty() {
        return HttpResponse::BadRequest().json(json!({"success": false, "error": "No se recibieron datos"}));
    }

    let recibidas = body.data.len();
    let filas: Vec<FilaCatalogo> = body
        .data
        .iter()
        .filter_map(Value::as_object)
        .filter_map(fila_desde_json)
        .collect();
    if filas.len() < recibidas {
        warn!("data/save: {} filas descartadas sin asig_codigo", recibidas - filas.len());
    }

    match persistir_y_publicar(&estado, filas).await {
        Ok(total) => HttpResponse::Ok().json(json!({
            "success": true,
            "message": format!("Se guardaron {} registros correctamente", total),
            "total": total
        })),
        Err(e) => {
            error!("data/save: {}", e);
            HttpResponse::InternalServerError().json(json!({"success": false, "error": e}))
        }
    }
}

/// `GET /api/data/export`
pub async fn datos_exportar_handler(estado: web::Data<EstadoApp>) -> impl Responder {
    let catalogo = estado.catalogo.snapshot();
    let bytes = match tokio::task::spawn_blocking(move || consolidado_a_bytes(catalogo.filas())).await {
        Ok(Ok(b)) => b,
        Ok(Err(e)) => {
            error!("data/export: {}", e);
            return HttpResponse::InternalServerError().json(json!({"success": false, "error": e.to_string()}));
        }
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(json!({"success": false, "error": format!("task join error: {}", e)}));
        }
    };

    HttpResponse::Ok()
        .content_type(XLSX_MIME)
        .append_header((header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", NOMBRE_EXPORTACION)))
        .body(bytes)
}

/// `POST /api/data/import`: recibe un Excel (multipart) y reemplaza el consolidado.
pub async fn datos_importar_handler(estado: web::Data<EstadoApp>, mut payload: Multipart) -> impl Responder {
    let mut archivo: Option<(String, Vec<u8>)> = None;

    while let Some(field_res) = payload.next().await {
        let mut field = match field_res {
            Ok(f) => f,
            Err(e) => {
                warn!("multipart field error: {}", e);
                return HttpResponse::BadRequest().json(json!({"success": false, "error": "No se recibió ningún archivo"}));
            }
        };

        let filename = match field.content_disposition().get_filename() {
            Some(n) => n.to_string(),
            None => continue,
        };

        let mut bytes: Vec<u8> = Vec::new();
        while let Some(chunk) = field.next().await {
            match chunk {
                Ok(data) => bytes.extend_from_slice(&data),
                Err(e) => {
                    warn!("upload stream error: {}", e);
                    return HttpResponse::BadRequest().json(json!({"success": false, "error": "Error leyendo el archivo"}));
                }
            }
        }

        if archivo.is_none() {
            archivo = Some((filename, bytes));
        }
    }

    let (nombre, bytes) = match archivo {
        Some((n, b)) if !n.trim().is_empty() => (n, b),
        _ => return HttpResponse::BadRequest().json(json!({"success": false, "error": "No se seleccionó ningún archivo"})),
    };

    if !es_archivo_excel(&nombre) {
        return HttpResponse::BadRequest()
            .json(json!({"success": false, "error": "El archivo debe ser Excel (.xlsx o .xls)"}));
    }

    let lectura = match tokio::task::spawn_blocking(move || leer_consolidado_desde_bytes(bytes)).await {
        Ok(r) => r,
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(json!({"success": false, "error": format!("task join error: {}", e)}));
        }
    };

    let filas = match lectura {
        Ok(f) => f,
        Err(e) => {
            warn!("data/import {}: {}", nombre, e);
            return HttpResponse::BadRequest().json(json!({"success": false, "error": e.to_string()}));
        }
    };

    match persistir_y_publicar(&estado, filas).await {
        Ok(total) => HttpResponse::Ok().json(json!({
            "success": true,
            "message": format!("Se importaron {} registros correctamente", total),
            "total": total
        })),
        Err(e) => {
            error!("data/import: {}", e);
            HttpResponse::InternalServerError().json(json!({"success": false, "error": e}))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_es_archivo_excel() {
        assert!(es_archivo_excel("consolidado.xlsx"));
        assert!(es_archivo_excel("VIEJO.XLS"));
        assert!(!es_archivo_excel("datos.csv"));
        assert!(!es_archivo_excel("sin_extension"));
    }
}
