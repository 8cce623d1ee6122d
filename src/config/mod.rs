//! Configuración del proceso (variables de entorno / `.env`) y de las
//! reglas de generación (grupos obligatorios y topones válidos).

pub mod reglas;
pub mod store;

pub use reglas::{ConfiguracionHorarios, EnteroFlexible, GroupConfigPayload, ToponPayload};
pub use store::ConfigStore;

use log::warn;
use std::env;
use std::path::PathBuf;

pub const BIND_POR_DEFECTO: &str = "127.0.0.1:8080";
pub const CONSOLIDADO_POR_DEFECTO: &str = "consolidado.xlsx";
pub const CONFIG_POR_DEFECTO: &str = "config.json";
pub const MAX_CURSOS_POR_DEFECTO: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Dirección donde escucha el servidor (`HORARIOS_BIND`).
    pub bind: String,
    /// Excel consolidado con todos los horarios (`HORARIOS_CONSOLIDADO`).
    pub consolidado: PathBuf,
    /// JSON con groupConfigs / toponesConfigs (`HORARIOS_CONFIG`).
    pub config_path: PathBuf,
    /// Máximo de cursos por solicitud (`HORARIOS_MAX_CURSOS`). El generador
    /// no se acota solo: este tope es la protección contra la explosión
    /// combinatoria.
    pub max_cursos: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            bind: BIND_POR_DEFECTO.to_string(),
            consolidado: PathBuf::from(CONSOLIDADO_POR_DEFECTO),
            config_path: PathBuf::from(CONFIG_POR_DEFECTO),
            max_cursos: MAX_CURSOS_POR_DEFECTO,
        }
    }
}

impl AppConfig {
    /// Lee `.env` si existe y luego las variables de entorno.
    pub fn from_env() -> Self {
        let _ = dotenv::dotenv();
        Self::from_lookup(|k| env::var(k).ok())
    }

    /// Construye la configuración desde una función de búsqueda de variables.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = AppConfig::default();
        let valor = |k: &str| lookup(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(b) = valor("HORARIOS_BIND") {
            cfg.bind = b;
        }
        if let Some(p) = valor("HORARIOS_CONSOLIDADO") {
            cfg.consolidado = PathBuf::from(p);
        }
        if let Some(p) = valor("HORARIOS_CONFIG") {
            cfg.config_path = PathBuf::from(p);
        }
        if let Some(m) = valor("HORARIOS_MAX_CURSOS") {
            match m.parse::<usize>() {
                Ok(n) if n > 0 => cfg.max_cursos = n,
                _ => warn!("HORARIOS_MAX_CURSOS inválido ({}), usando {}", m, MAX_CURSOS_POR_DEFECTO),
            }
        }
        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_valores_por_defecto() {
        let cfg = AppConfig::from_lookup(|_| None);
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.max_cursos, 6);
    }

    #[test]
    fn test_lee_variables() {
        let vars: HashMap<&str, &str> = [
            ("HORARIOS_BIND", "0.0.0.0:5000"),
            ("HORARIOS_CONSOLIDADO", "/data/consolidado.xlsx"),
            ("HORARIOS_MAX_CURSOS", "8"),
        ]
        .into_iter()
        .collect();
        let cfg = AppConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.bind, "0.0.0.0:5000");
        assert_eq!(cfg.consolidado, PathBuf::from("/data/consolidado.xlsx"));
        assert_eq!(cfg.config_path, PathBuf::from("config.json"));
        assert_eq!(cfg.max_cursos, 8);
    }

    #[test]
    fn test_max_cursos_invalido_usa_defecto() {
        let cfg = AppConfig::from_lookup(|k| if k == "HORARIOS_MAX_CURSOS" { Some("muchos".to_string()) } else { None });
        assert_eq!(cfg.max_cursos, MAX_CURSOS_POR_DEFECTO);
        let cero = AppConfig::from_lookup(|k| if k == "HORARIOS_MAX_CURSOS" { Some("0".to_string()) } else { None });
        assert_eq!(cero.max_cursos, MAX_CURSOS_POR_DEFECTO);
    }
}
