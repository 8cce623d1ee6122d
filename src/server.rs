use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use log::{error, info};
use tokio::sync::Mutex;

use crate::api_json::handlers::{
    config_load_handler, config_save_handler, cursos_handler, datos_exportar_handler, datos_guardar_handler,
    datos_importar_handler, datos_todos_handler, estructura_handler, generar_handler, help_handler,
    horarios_ancla_handler, horarios_bach1121_handler, secciones_handler,
};
use crate::catalogo::{Catalogo, CatalogoCompartido};
use crate::config::{AppConfig, ConfigStore};
use crate::excel::cargar_catalogo;

/// Estado compartido por todos los handlers.
pub struct EstadoApp {
    pub catalogo: CatalogoCompartido,
    pub config: AppConfig,
    pub store: ConfigStore,
    /// Serializa las actualizaciones del consolidado (archivo + catálogo).
    pub escritura: Mutex<()>,
}

impl EstadoApp {
    pub fn new(config: AppConfig, catalogo: Catalogo) -> Self {
        EstadoApp {
            catalogo: CatalogoCompartido::new(catalogo),
            store: ConfigStore::new(&config.config_path),
            config,
            escritura: Mutex::new(()),
        }
    }

    /// Estado inicial: lee el consolidado configurado. Si no se puede leer el
    /// servidor parte con un catálogo vacío (se puede importar después).
    pub fn cargar(config: AppConfig) -> Self {
        let catalogo = match cargar_catalogo(&config.consolidado) {
            Ok(c) => {
                info!("catálogo cargado desde {:?}: {} bloques", config.consolidado, c.len());
                c
            }
            Err(e) => {
                error!("no se pudo cargar {:?}: {}", config.consolidado, e);
                Catalogo::default()
            }
        };
        EstadoApp::new(config, catalogo)
    }
}

/// Registra todas las rutas de la API.
pub fn configurar_rutas(cfg: &mut web::ServiceConfig) {
    cfg.route("/help", web::get().to(help_handler))
        .route("/api/courses", web::get().to(cursos_handler))
        .route("/api/generate", web::post().to(generar_handler))
        .route("/api/course/{code}/sections", web::get().to(secciones_handler))
        .route("/api/course/{code}/structure", web::get().to(estructura_handler))
        .route("/api/config/load", web::get().to(config_load_handler))
        .route("/api/config/save", web::post().to(config_save_handler))
        .route("/api/anchor/{code}/schedules", web::get().to(horarios_ancla_handler))
        .route("/api/bach1121/schedules", web::get().to(horarios_bach1121_handler))
        .route("/api/data/all", web::get().to(datos_todos_handler))
        .route("/api/data/save", web::post().to(datos_guardar_handler))
        .route("/api/data/export", web::get().to(datos_exportar_handler))
        .route("/api/data/import", web::post().to(datos_importar_handler));
}

pub async fn run_server(config: AppConfig) -> std::io::Result<()> {
    let bind_addr = config.bind.clone();
    let estado = web::Data::new(EstadoApp::cargar(config));

    info!("Iniciando servidor en http://{}", bind_addr);
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(estado.clone())
            .configure(configurar_rutas)
    })
    .bind(bind_addr)?
    .run()
    .await
}
