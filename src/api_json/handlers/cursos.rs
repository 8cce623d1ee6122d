use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;

use crate::models::{Bloque, CURSO_ANCLA_POR_DEFECTO};
use crate::server::EstadoApp;

#[derive(Debug, Serialize)]
struct SeccionDto {
    section: i64,
    group: i64,
    blocks: Vec<Bloque>,
}

/// `GET /api/courses`
pub async fn cursos_handler(estado: web::Data<EstadoApp>) -> impl Responder {
    let catalogo = estado.catalogo.snapshot();
    HttpResponse::Ok().json(catalogo.cursos())
}

/// `GET /api/course/{code}/sections`
pub async fn secciones_handler(estado: web::Data<EstadoApp>, path: web::Path<String>) -> impl Responder {
    let codigo = path.into_inner();
    let catalogo = estado.catalogo.snapshot();
    let secciones: Vec<SeccionDto> = catalogo
        .secciones_de_curso(codigo.trim())
        .into_iter()
        .map(|(section, group)| SeccionDto {
            section,
            group,
            blocks: catalogo.bloques_de_seccion(codigo.trim(), section, group),
        })
        .collect();
    HttpResponse::Ok().json(secciones)
}

/// `GET /api/course/{code}/structure`
pub async fn estructura_handler(estado: web::Data<EstadoApp>, path: web::Path<String>) -> impl Responder {
    let codigo = path.into_inner();
    let catalogo = estado.catalogo.snapshot();
    HttpResponse::Ok().json(catalogo.estructura(codigo.trim()))
}

/// `GET /api/anchor/{code}/schedules`
pub async fn horarios_ancla_handler(estado: web::Data<EstadoApp>, path: web::Path<String>) -> impl Responder {
    let codigo = path.into_inner();
    let catalogo = estado.catalogo.snapshot();
    HttpResponse::Ok().json(catalogo.horarios_ancla(codigo.trim()))
}

/// `GET /api/bach1121/schedules`
pub async fn horarios_bach1121_handler(estado: web::Data<EstadoApp>) -> impl Responder {
    let catalogo = estado.catalogo.snapshot();
    HttpResponse::Ok().json(catalogo.horarios_ancla(CURSO_ANCLA_POR_DEFECTO))
}
