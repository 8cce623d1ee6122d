// --- Generador de Horarios - Archivo principal ---

use quickshift_horarios::config::AppConfig;
use quickshift_horarios::run_server;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("=== Generador de Horarios (API) ===");
    let config = AppConfig::from_env();
    run_server(config).await
}
