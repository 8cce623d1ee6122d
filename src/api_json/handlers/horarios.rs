use actix_web::{web, HttpResponse, Responder};
use log::{error, info, warn};
use serde_json::json;
use std::sync::{Arc, OnceLock};
use std::time::Instant;
use tokio::sync::Semaphore;

use crate::algorithm::generar_horarios;
use crate::api_json::{resumir_horarios, GenerarRequest};
use crate::error::GeneracionError;
use crate::server::EstadoApp;

/// Generaciones concurrentes: una por CPU.
fn semaforo_generacion() -> Arc<Semaphore> {
    static GLOBAL_SEM: OnceLock<Arc<Semaphore>> = OnceLock::new();
    GLOBAL_SEM
        .get_or_init(|| {
            let procs = num_cpus::get();
            Arc::new(Semaphore::new(std::cmp::max(1, procs)))
        })
        .clone()
}

/// `POST /api/generate`
pub async fn generar_handler(estado: web::Data<EstadoApp>, body: web::Json<GenerarRequest>) -> impl Responder {
    let solicitud = match body.a_solicitud(estado.config.max_cursos) {
        Ok(s) => s,
        Err(e) => return HttpResponse::BadRequest().json(json!({"success": false, "error": e.to_string()})),
    };

    let catalogo = estado.catalogo.snapshot();
    let start = Instant::now();

    let permit = match semaforo_generacion().acquire_owned().await {
        Ok(p) => p,
        Err(_) => return HttpResponse::InternalServerError().json(json!({"success": false, "error": "failed to acquire semaphore"})),
    };

    let cursos = solicitud.cursos.clone();
    let blocking_handle = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        generar_horarios(&catalogo, &solicitud)
    });

    let resultado = match blocking_handle.await {
        Ok(res) => res,
        Err(e) => {
            error!("generación abortada: {}", e);
            return HttpResponse::InternalServerError().json(json!({"success": false, "error": format!("task join error: {}", e)}));
        }
    };

    match resultado {
        Ok(horarios) => {
            let resp = resumir_horarios(horarios);
            info!(
                "generate {:?}: {} horarios en {} ms",
                cursos,
                resp.schedules.len(),
                start.elapsed().as_millis()
            );
            HttpResponse::Ok().json(resp)
        }
        Err(GeneracionError::SinDatosCatalogo { curso }) => {
            warn!("generate {:?}: sin datos para {}", cursos, curso);
            HttpResponse::Ok().json(resumir_horarios(Vec::new()))
        }
        Err(e @ GeneracionError::SeleccionVacia) => {
            HttpResponse::BadRequest().json(json!({"success": false, "error": e.to_string()}))
        }
    }
}

/// `GET /help`: ejemplo de solicitud para `/api/generate`.
pub async fn help_handler() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "endpoint": "POST /api/generate",
        "example": {
            "courses": ["BACH1121", "CES1159"],
            "groupConfigs": {
                "CES1159_1": {"course": "CES1159", "section": 1, "groups": [0, 1]}
            },
            "validTopones": {
                "1_1_Lunes_08:30_10:20": {
                    "course": "BACH1121", "section": 1, "dia": "Lunes",
                    "hora_ini": "08:30", "hora_fin": "10:20", "tapon_type": "completo"
                }
            },
            "includeConflicts": true
        }
    }))
}
