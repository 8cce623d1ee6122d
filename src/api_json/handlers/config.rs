use actix_web::{web, HttpResponse, Responder};
use log::error;
use serde_json::json;

use crate::config::ConfiguracionHorarios;
use crate::server::EstadoApp;

/// `GET /api/config/load`
pub async fn config_load_handler(estado: web::Data<EstadoApp>) -> impl Responder {
    HttpResponse::Ok().json(estado.store.load())
}

/// `POST /api/config/save`
pub async fn config_save_handler(
    estado: web::Data<EstadoApp>,
    body: web::Json<ConfiguracionHorarios>,
) -> impl Responder {
    match estado.store.save(&body) {
        Ok(()) => HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Configuración guardada correctamente"
        })),
        Err(e) => {
            error!("no se pudo guardar la configuración: {}", e);
            HttpResponse::InternalServerError().json(json!({"success": false, "error": e.to_string()}))
        }
    }
}
