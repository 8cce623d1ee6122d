//! Payloads de configuración tal como los envía el frontend y su
//! conversión a reglas tipadas. Las entradas mal formadas se descartan
//! aquí, de modo que el generador sólo recibe reglas válidas.

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::models::{ReglaGrupos, ReglaTopon, TipoTopon, CURSO_ANCLA_POR_DEFECTO};

/// Entero que puede llegar como número (`1`, `1.0`) o como texto (`"1"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnteroFlexible {
    Numero(i64),
    Decimal(f64),
    Texto(String),
}

impl EnteroFlexible {
    pub fn valor(&self) -> Option<i64> {
        match self {
            EnteroFlexible::Numero(n) => Some(*n),
            EnteroFlexible::Decimal(f) if f.fract() == 0.0 => Some(*f as i64),
            EnteroFlexible::Decimal(_) => None,
            EnteroFlexible::Texto(s) => {
                let t = s.trim();
                t.parse::<i64>().ok().or_else(|| match t.parse::<f64>() {
                    Ok(f) if f.fract() == 0.0 => Some(f as i64),
                    _ => None,
                })
            }
        }
    }
}

impl From<i64> for EnteroFlexible {
    fn from(n: i64) -> Self {
        EnteroFlexible::Numero(n)
    }
}

/// Grupos obligatorios de una sección, p. ej.
/// `{"course": "CES1159", "section": 1, "groups": [0, 1]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupConfigPayload {
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub section: Option<EnteroFlexible>,
    #[serde(default)]
    pub groups: Vec<EnteroFlexible>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl GroupConfigPayload {
    /// `None` si falta el curso o la sección, o si quedan menos de dos
    /// grupos distintos.
    pub fn a_regla(&self) -> Option<ReglaGrupos> {
        let curso = self.course.trim();
        if curso.is_empty() {
            return None;
        }
        let seccion = self.section.as_ref()?.valor()?;
        let mut grupos: Vec<i64> = Vec::new();
        for g in &self.groups {
            let g = g.valor()?;
            if !grupos.contains(&g) {
                grupos.push(g);
            }
        }
        if grupos.len() < 2 {
            return None;
        }
        Some(ReglaGrupos { curso: curso.to_string(), seccion, grupos })
    }
}

/// Bloque del curso ancla registrado como topón válido, p. ej.
/// `{"section": 1, "dia": "Lunes", "hora_ini": "08:00", "hora_fin": "10:00", "tapon_type": "completo"}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToponPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    #[serde(default)]
    pub section: Option<EnteroFlexible>,
    #[serde(default)]
    pub dia: String,
    #[serde(default)]
    pub hora_ini: String,
    #[serde(default)]
    pub hora_fin: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tapon_type: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ToponPayload {
    /// Sin `tapon_type` la regla es `completo`; cualquier valor distinto de
    /// `completo` se trata como `parcial`. Sin `course` el ancla es BACH1121.
    pub fn a_regla(&self) -> Option<ReglaTopon> {
        let seccion = self.section.as_ref()?.valor()?;
        if self.dia.trim().is_empty() || self.hora_ini.trim().is_empty() || self.hora_fin.trim().is_empty() {
            return None;
        }
        let tipo = match self.tapon_type.as_deref().map(|t| t.trim().to_lowercase()) {
            None => TipoTopon::Completo,
            Some(t) if t == "completo" => TipoTopon::Completo,
            Some(_) => TipoTopon::Parcial,
        };
        let curso_ancla = self
            .course
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(CURSO_ANCLA_POR_DEFECTO)
            .to_string();
        Some(ReglaTopon {
            curso_ancla,
            seccion,
            dia: self.dia.trim().to_string(),
            hora_ini: self.hora_ini.trim().to_string(),
            hora_fin: self.hora_fin.trim().to_string(),
            tipo,
        })
    }
}

/// Deserializa un mapa clave → payload descartando las entradas que no
/// calzan con `T`. Si el valor completo no es un objeto (p. ej. `null`) el
/// mapa queda vacío.
pub fn mapa_tolerante<'de, D, T>(deserializer: D) -> Result<BTreeMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let crudo = Value::deserialize(deserializer)?;
    let entradas = match crudo {
        Value::Object(m) => m,
        Value::Null => return Ok(BTreeMap::new()),
        otro => {
            debug!("mapa de reglas ignorado, se esperaba un objeto: {}", otro);
            return Ok(BTreeMap::new());
        }
    };
    Ok(entradas
        .into_iter()
        .filter_map(|(clave, valor)| match serde_json::from_value::<T>(valor) {
            Ok(p) => Some((clave, p)),
            Err(e) => {
                debug!("entrada '{}' ignorada: {}", clave, e);
                None
            }
        })
        .collect())
}

/// Contenido de `config.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfiguracionHorarios {
    #[serde(rename = "groupConfigs", default, deserialize_with = "mapa_tolerante")]
    pub group_configs: BTreeMap<String, GroupConfigPayload>,
    #[serde(rename = "toponesConfigs", default, deserialize_with = "mapa_tolerante")]
    pub topones_configs: BTreeMap<String, ToponPayload>,
}

/// Reglas de grupos válidas, en orden de clave.
pub fn reglas_grupos(payloads: &BTreeMap<String, GroupConfigPayload>) -> Vec<ReglaGrupos> {
    payloads
        .iter()
        .filter_map(|(clave, p)| {
            let r = p.a_regla();
            if r.is_none() {
                debug!("groupConfig '{}' ignorado: {:?}", clave, p);
            }
            r
        })
        .collect()
}

/// Reglas de topones válidas, en orden de clave.
pub fn reglas_topones(payloads: &BTreeMap<String, ToponPayload>) -> Vec<ReglaTopon> {
    payloads
        .iter()
        .filter_map(|(clave, p)| {
            let r = p.a_regla();
            if r.is_none() {
                debug!("validTopon '{}' ignorado: {:?}", clave, p);
            }
            r
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entero_flexible() {
        let v: Vec<EnteroFlexible> = serde_json::from_str(r#"[1, 2.0, "3", " 4 ", "x", 1.5]"#).unwrap();
        let vals: Vec<Option<i64>> = v.iter().map(|e| e.valor()).collect();
        assert_eq!(vals, vec![Some(1), Some(2), Some(3), Some(4), None, None]);
    }

    #[test]
    fn test_group_config_valido() {
        let p: GroupConfigPayload =
            serde_json::from_str(r#"{"course": "CES1159", "section": "1", "groups": [0, 1, 1]}"#).unwrap();
        assert_eq!(
            p.a_regla(),
            Some(ReglaGrupos { curso: "CES1159".to_string(), seccion: 1, grupos: vec![0, 1] })
        );
    }

    #[test]
    fn test_group_config_un_grupo_se_descarta() {
        let uno: GroupConfigPayload =
            serde_json::from_str(r#"{"course": "CES1159", "section": 1, "groups": [0]}"#).unwrap();
        assert_eq!(uno.a_regla(), None);
        let repetido: GroupConfigPayload =
            serde_json::from_str(r#"{"course": "CES1159", "section": 1, "groups": [2, 2]}"#).unwrap();
        assert_eq!(repetido.a_regla(), None);
        let sin_curso: GroupConfigPayload = serde_json::from_str(r#"{"section": 1, "groups": [0, 1]}"#).unwrap();
        assert_eq!(sin_curso.a_regla(), None);
    }

    #[test]
    fn test_topon_payload() {
        let p: ToponPayload = serde_json::from_str(
            r#"{"id": "1_1_Lunes_08:00_10:00", "section": 1, "dia": "Lunes", "hora_ini": "08:00", "hora_fin": "10:00", "tapon_type": "parcial"}"#,
        )
        .unwrap();
        let r = p.a_regla().unwrap();
        assert_eq!(r.curso_ancla, "BACH1121");
        assert_eq!(r.tipo, TipoTopon::Parcial);
        assert_eq!(p.extra.get("id"), Some(&serde_json::json!("1_1_Lunes_08:00_10:00")));

        let sin_tipo: ToponPayload =
            serde_json::from_str(r#"{"section": 2, "dia": "Martes", "hora_ini": "10:00", "hora_fin": "11:30"}"#).unwrap();
        assert_eq!(sin_tipo.a_regla().unwrap().tipo, TipoTopon::Completo);

        let incompleto: ToponPayload = serde_json::from_str(r#"{"section": 2, "dia": "Martes"}"#).unwrap();
        assert_eq!(incompleto.a_regla(), None);
    }

    #[test]
    fn test_configuracion_acepta_claves_faltantes() {
        let cfg: ConfiguracionHorarios = serde_json::from_str("{}").unwrap();
        assert!(cfg.group_configs.is_empty());
        assert!(cfg.topones_configs.is_empty());

        let cfg: ConfiguracionHorarios = serde_json::from_str(
            r#"{"groupConfigs": {"CES1159_1": {"course": "CES1159", "section": 1, "groups": [0, 1]},
                                 "MAT_1": {"course": "MAT", "section": 1, "groups": [0]}}}"#,
        )
        .unwrap();
        assert_eq!(reglas_grupos(&cfg.group_configs).len(), 1);
    }

    #[test]
    fn test_entrada_mal_formada_no_anula_las_demas() {
        let cfg: ConfiguracionHorarios = serde_json::from_str(
            r#"{"groupConfigs": {"BAD": {"course": null, "section": 1, "groups": [0, 1]},
                                 "CES1159_1": {"course": "CES1159", "section": 1, "groups": [0, 1]},
                                 "NULOS": {"course": "MAT", "section": 1, "groups": null}},
                "toponesConfigs": {"BAD": {"section": 1, "dia": 5},
                                   "1_1_Lunes": {"section": 1, "dia": "Lunes", "hora_ini": "08:30", "hora_fin": "10:20"},
                                   "NO_OBJETO": 3}}"#,
        )
        .unwrap();
        assert_eq!(cfg.group_configs.len(), 1);
        assert!(cfg.group_configs.contains_key("CES1159_1"));
        assert_eq!(reglas_grupos(&cfg.group_configs).len(), 1);
        assert_eq!(cfg.topones_configs.len(), 1);
        assert_eq!(reglas_topones(&cfg.topones_configs).len(), 1);

        let nulo: ConfiguracionHorarios =
            serde_json::from_str(r#"{"groupConfigs": null, "toponesConfigs": []}"#).unwrap();
        assert_eq!(nulo, ConfiguracionHorarios::default());
    }
}
