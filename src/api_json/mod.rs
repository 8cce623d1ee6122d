use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::algorithm::SolicitudGeneracion;
use crate::config::reglas::{mapa_tolerante, reglas_grupos, reglas_topones};
use crate::config::{GroupConfigPayload, ToponPayload};
use crate::error::SolicitudError;
use crate::models::{HorarioGenerado, Veredicto};

pub mod handlers;

/// Cuerpo de `POST /api/generate`
///
/// # Estructura del JSON esperado:
/// ```json
/// {
///   "courses": ["BACH1121", "CES1159", "MAT1001"],
///   "groupConfigs": {
///     "CES1159_1": { "course": "CES1159", "section": 1, "groups": [0, 1] }
///   },
///   "validTopones": {
///     "1_1_Lunes_08:30_10:20": {
///       "section": 1, "dia": "Lunes", "hora_ini": "08:30", "hora_fin": "10:20",
///       "tapon_type": "completo"
///     }
///   },
///   "includeConflicts": true
/// }
/// ```
///
/// # Campos:
/// - `courses`: códigos de los cursos a combinar (1 a `HORARIOS_MAX_CURSOS`)
/// - `groupConfigs`: grupos que deben tomarse juntos dentro de una sección (opcional)
/// - `validTopones`: bloques del curso ancla que pueden toparse (opcional).
///   `course` indica el curso ancla; si falta se usa BACH1121.
///   En ambos mapas las entradas mal formadas se descartan sin error
/// - `includeConflicts`: si se devuelven también los horarios con topones inválidos (por defecto `true`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerarRequest {
    #[serde(default)]
    pub courses: Vec<String>,
    #[serde(rename = "groupConfigs", default, deserialize_with = "mapa_tolerante")]
    pub group_configs: BTreeMap<String, GroupConfigPayload>,
    #[serde(rename = "validTopones", default, deserialize_with = "mapa_tolerante")]
    pub valid_topones: BTreeMap<String, ToponPayload>,
    #[serde(rename = "includeConflicts", default = "incluir_conflictos_por_defecto")]
    pub include_conflicts: bool,
}

fn incluir_conflictos_por_defecto() -> bool {
    true
}

pub fn parse_generar_request(json_str: &str) -> Result<GenerarRequest, serde_json::Error> {
    serde_json::from_str::<GenerarRequest>(json_str)
}

impl GenerarRequest {
    /// Valida la solicitud y la convierte en la entrada del generador.
    /// Los códigos se recortan y se quitan vacíos y repetidos (conservando
    /// el orden); las reglas mal formadas se descartan.
    pub fn a_solicitud(&self, max_cursos: usize) -> Result<SolicitudGeneracion, SolicitudError> {
        let mut cursos: Vec<String> = Vec::new();
        for c in &self.courses {
            let c = c.trim();
            if !c.is_empty() && !cursos.iter().any(|x| x == c) {
                cursos.push(c.to_string());
            }
        }
        if cursos.is_empty() {
            return Err(SolicitudError::SinCursos);
        }
        if cursos.len() > max_cursos {
            return Err(SolicitudError::DemasiadosCursos { max: max_cursos, recibidos: cursos.len() });
        }

        let reglas_grupos = reglas_grupos(&self.group_configs);
        let reglas_topones = reglas_topones(&self.valid_topones);
        debug!(
            "solicitud: cursos {:?}, {} reglas de grupos, {} topones válidos",
            cursos,
            reglas_grupos.len(),
            reglas_topones.len()
        );

        Ok(SolicitudGeneracion {
            cursos,
            reglas_grupos,
            reglas_topones,
            incluir_conflictos: self.include_conflicts,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConteoHorarios {
    pub sin_topones: usize,
    pub topones_validos: usize,
    pub con_topones: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerarResponse {
    pub success: bool,
    pub message: String,
    pub counts: ConteoHorarios,
    pub schedules: Vec<HorarioGenerado>,
}

/// Arma la respuesta con el mensaje de resumen por tipo de horario.
pub fn resumir_horarios(horarios: Vec<HorarioGenerado>) -> GenerarResponse {
    if horarios.is_empty() {
        return GenerarResponse {
            success: false,
            message: "No se encontraron combinaciones de horarios".to_string(),
            counts: ConteoHorarios::default(),
            schedules: horarios,
        };
    }

    let mut counts = ConteoHorarios::default();
    for h in &horarios {
        match h.veredicto {
            Veredicto::SinTopones => counts.sin_topones += 1,
            Veredicto::ToponesValidos => counts.topones_validos += 1,
            Veredicto::ConTopones => counts.con_topones += 1,
        }
    }

    let mut message = format!("Se encontraron {} horarios sin topones", counts.sin_topones);
    if counts.topones_validos > 0 {
        message.push_str(&format!(", {} con topones válidos", counts.topones_validos));
    }
    if counts.con_topones > 0 {
        message.push_str(&format!(" y {} con topones inválidos", counts.con_topones));
    }

    GenerarResponse { success: true, message, counts, schedules: horarios }
}
