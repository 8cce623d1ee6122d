// Estructuras de datos principales

use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// Curso cuyos bloques pueden registrarse como topones válidos cuando la
/// regla no indica otro curso.
pub const CURSO_ANCLA_POR_DEFECTO: &str = "BACH1121";

/// Un bloque de horario: una ocurrencia semanal de una sección/grupo.
/// Las claves JSON son las que consume el frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bloque {
    pub curso: String,
    pub nombre: String,
    pub seccion: i64,
    pub grupo: i64,
    pub dia: String,
    pub hora_ini: String,
    pub hora_fin: String,
    pub campus: String,
}

/// Fila del consolidado tal como se leyó del Excel. Las columnas que no usa
/// el generador se conservan en `extra` para poder editar y exportar sin
/// perder información.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilaCatalogo {
    pub asig_codigo: String,
    pub asig_nombre: String,
    pub psec_codigo: i64,
    pub pgru_codigo: i64,
    pub sdia_descripcion: String,
    pub sper_hora_ini: String,
    pub sper_hora_fin: String,
    pub camp_campus: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl FilaCatalogo {
    pub fn a_bloque(&self) -> Bloque {
        Bloque {
            curso: self.asig_codigo.clone(),
            nombre: self.asig_nombre.clone(),
            seccion: self.psec_codigo,
            grupo: self.pgru_codigo,
            dia: self.sdia_descripcion.clone(),
            hora_ini: self.sper_hora_ini.clone(),
            hora_fin: self.sper_hora_fin.clone(),
            campus: self.camp_campus.clone(),
        }
    }
}

/// Identificador de grupo de una opción: un grupo suelto o una combinación
/// fija de grupos que se toman juntos. Se serializa como número o como
/// `"0+1"` respectivamente.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grupo {
    Individual(i64),
    Combinado(Vec<i64>),
}

impl Grupo {
    pub fn etiqueta(&self) -> String {
        match self {
            Grupo::Individual(g) => g.to_string(),
            Grupo::Combinado(gs) => gs.iter().map(|g| g.to_string()).collect::<Vec<_>>().join("+"),
        }
    }

    pub fn es_combinado(&self) -> bool {
        matches!(self, Grupo::Combinado(_))
    }
}

impl Serialize for Grupo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Grupo::Individual(g) => serializer.serialize_i64(*g),
            Grupo::Combinado(_) => serializer.serialize_str(&self.etiqueta()),
        }
    }
}

/// Unidad seleccionable de un curso. Dentro de un curso las opciones son
/// alternativas excluyentes: cada horario generado toma exactamente una.
#[derive(Debug, Clone, PartialEq)]
pub struct OpcionSeccion {
    pub curso: String,
    pub seccion: i64,
    pub grupo: Grupo,
    pub bloques: Vec<Bloque>,
}

/// Grupos de una sección que deben tomarse juntos (siempre 2 o más).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReglaGrupos {
    pub curso: String,
    pub seccion: i64,
    pub grupos: Vec<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipoTopon {
    /// El otro bloque debe cubrir completamente el bloque ancla.
    Completo,
    /// Cualquier solapamiento es aceptable.
    Parcial,
}

impl TipoTopon {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoTopon::Completo => "completo",
            TipoTopon::Parcial => "parcial",
        }
    }
}

/// Topón aceptado: identifica un bloque concreto del curso ancla
/// (sección, día, inicio, fin) que puede solaparse con otro curso.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReglaTopon {
    pub curso_ancla: String,
    pub seccion: i64,
    pub dia: String,
    pub hora_ini: String,
    pub hora_fin: String,
    pub tipo: TipoTopon,
}

impl ReglaTopon {
    /// True si `bloque` es exactamente el bloque ancla de esta regla.
    pub fn coincide_con(&self, bloque: &Bloque) -> bool {
        bloque.curso == self.curso_ancla
            && bloque.seccion == self.seccion
            && bloque.dia.trim() == self.dia.trim()
            && bloque.hora_ini.trim() == self.hora_ini.trim()
            && bloque.hora_fin.trim() == self.hora_fin.trim()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum TipoConflicto {
    #[serde(rename = "overlap")]
    Solapamiento,
    #[serde(rename = "travel_time")]
    TiempoTraslado,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conflicto {
    pub tipo: TipoConflicto,
    pub bloque1: Bloque,
    pub bloque2: Bloque,
    pub mensaje: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToponAceptado {
    pub tipo: TipoTopon,
    pub bloque1: Bloque,
    pub bloque2: Bloque,
    pub mensaje: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Veredicto {
    SinTopones,
    ToponesValidos,
    ConTopones,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeccionElegida {
    pub course: String,
    pub section: i64,
    pub group: Grupo,
}

/// Una combinación generada: una opción por curso, todos sus bloques,
/// el puntaje y el detalle de topones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HorarioGenerado {
    pub sections: Vec<SeccionElegida>,
    pub blocks: Vec<Bloque>,
    pub score: f64,
    #[serde(rename = "status")]
    pub veredicto: Veredicto,
    pub has_conflicts: bool,
    pub has_valid_topones: bool,
    pub conflicts: Vec<String>,
    pub conflict_types: Vec<TipoConflicto>,
    pub valid_topones: Vec<String>,
    pub valid_topon_types: Vec<TipoTopon>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CursoResumen {
    pub asig_codigo: String,
    pub asig_nombre: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EstructuraSeccion {
    pub section: i64,
    pub groups: Vec<i64>,
}

/// Bloque individual de un curso ancla, listo para configurarlo como topón.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HorarioAncla {
    pub id: String,
    pub section: i64,
    pub group: i64,
    pub dia: String,
    pub hora_ini: String,
    pub hora_fin: String,
    pub tapon_type: TipoTopon,
    pub campus: String,
    pub display: String,
}
