use log::{info, warn};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::reglas::ConfiguracionHorarios;

/// Guarda y carga `config.json` (groupConfigs / toponesConfigs).
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        ConfigStore { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Configuración guardada. Si el archivo no existe o no se puede leer se
    /// devuelve una configuración vacía.
    pub fn load(&self) -> ConfiguracionHorarios {
        if !self.path.exists() {
            return ConfiguracionHorarios::default();
        }
        let contenido = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) => {
                warn!("no se pudo leer {:?}: {}", self.path, e);
                return ConfiguracionHorarios::default();
            }
        };
        if contenido.trim().is_empty() {
            return ConfiguracionHorarios::default();
        }
        match serde_json::from_str::<ConfiguracionHorarios>(&contenido) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("config inválida en {:?}: {}", self.path, e);
                ConfiguracionHorarios::default()
            }
        }
    }

    /// Sobrescribe el archivo con `cfg` en JSON indentado.
    pub fn save(&self, cfg: &ConfiguracionHorarios) -> Result<(), Box<dyn Error>> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        let text = serde_json::to_string_pretty(cfg)?;
        fs::write(&self.path, text)?;
        info!(
            "configuración guardada en {:?} ({} groupConfigs, {} toponesConfigs)",
            self.path,
            cfg.group_configs.len(),
            cfg.topones_configs.len()
        );
        Ok(())
    }
}
