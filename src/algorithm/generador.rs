//! Generador de horarios: expande cada curso en sus opciones de sección,
//! recorre el producto cartesiano, valida y puntúa cada combinación y
//! devuelve el ranking final.
//!
//! El núcleo no limita el tamaño del producto: acotar la cantidad de cursos
//! seleccionados (p. ej. a 6) es responsabilidad de quien llama.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, info, warn};

use crate::algorithm::producto::ProductoCartesiano;
use crate::algorithm::puntaje::calcular_puntaje;
use crate::algorithm::validacion::validar_combinacion;
use crate::catalogo::Catalogo;
use crate::error::GeneracionError;
use crate::models::{
    Bloque, Grupo, HorarioGenerado, OpcionSeccion, ReglaGrupos, ReglaTopon, SeccionElegida, Veredicto,
};

/// Entrada del generador, ya validada en el borde.
#[derive(Debug, Clone)]
pub struct SolicitudGeneracion {
    pub cursos: Vec<String>,
    pub reglas_grupos: Vec<ReglaGrupos>,
    pub reglas_topones: Vec<ReglaTopon>,
    pub incluir_conflictos: bool,
}

impl SolicitudGeneracion {
    pub fn new(cursos: Vec<String>) -> Self {
        SolicitudGeneracion {
            cursos,
            reglas_grupos: Vec::new(),
            reglas_topones: Vec::new(),
            incluir_conflictos: true,
        }
    }
}

/// Opciones seleccionables de `curso`.
///
/// Si una sección tiene una regla de grupos obligatorios (2 o más grupos) y
/// todos esos grupos existen en el catálogo, la sección aporta una única
/// opción combinada con los bloques de esos grupos. En cualquier otro caso
/// cada grupo de la sección es una opción independiente.
pub fn resolver_opciones(catalogo: &Catalogo, curso: &str, reglas: &[ReglaGrupos]) -> Vec<OpcionSeccion> {
    let mut grupos_por_seccion: BTreeMap<i64, Vec<i64>> = BTreeMap::new();
    for (seccion, grupo) in catalogo.secciones_de_curso(curso) {
        grupos_por_seccion.entry(seccion).or_default().push(grupo);
    }

    let mut opciones = Vec::new();
    for (seccion, disponibles) in grupos_por_seccion {
        // la regla registrada más tarde prevalece
        let regla = reglas
            .iter()
            .rev()
            .find(|r| r.curso == curso && r.seccion == seccion && r.grupos.len() >= 2);

        if let Some(regla) = regla {
            if regla.grupos.iter().all(|g| disponibles.contains(g)) {
                let bloques: Vec<Bloque> = regla
                    .grupos
                    .iter()
                    .flat_map(|&g| catalogo.bloques_de_seccion(curso, seccion, g))
                    .collect();
                if !bloques.is_empty() {
                    debug!("{} sección {}: grupos {:?} combinados", curso, seccion, regla.grupos);
                    opciones.push(OpcionSeccion {
                        curso: curso.to_string(),
                        seccion,
                        grupo: Grupo::Combinado(regla.grupos.clone()),
                        bloques,
                    });
                    continue;
                }
            }
            debug!(
                "{} sección {}: grupos {:?} no disponibles (hay {:?}), se usan grupos individuales",
                curso, seccion, regla.grupos, disponibles
            );
        }

        for grupo in disponibles {
            let bloques = catalogo.bloques_de_seccion(curso, seccion, grupo);
            if !bloques.is_empty() {
                opciones.push(OpcionSeccion {
                    curso: curso.to_string(),
                    seccion,
                    grupo: Grupo::Individual(grupo),
                    bloques,
                });
            }
        }
    }
    opciones
}

/// Valida y puntúa una combinación (una opción por curso).
pub fn evaluar_combinacion(combinacion: &[&OpcionSeccion], reglas_topones: &[ReglaTopon]) -> HorarioGenerado {
    let secciones: Vec<&[Bloque]> = combinacion.iter().map(|o| o.bloques.as_slice()).collect();
    let validacion = validar_combinacion(&secciones, reglas_topones);

    let todos: Vec<&Bloque> = combinacion.iter().flat_map(|o| o.bloques.iter()).collect();
    let score = calcular_puntaje(&todos);

    let veredicto = if !validacion.es_valido {
        Veredicto::ConTopones
    } else if !validacion.topones_validos.is_empty() {
        Veredicto::ToponesValidos
    } else {
        Veredicto::SinTopones
    };

    let conflict_types: BTreeSet<_> = validacion.conflictos.iter().map(|c| c.tipo).collect();
    let valid_topon_types: BTreeSet<_> = validacion.topones_validos.iter().map(|t| t.tipo).collect();

    HorarioGenerado {
        sections: combinacion
            .iter()
            .map(|o| SeccionElegida { course: o.curso.clone(), section: o.seccion, group: o.grupo.clone() })
            .collect(),
        blocks: todos.into_iter().cloned().collect(),
        score,
        veredicto,
        has_conflicts: !validacion.es_valido,
        has_valid_topones: !validacion.topones_validos.is_empty(),
        conflicts: validacion.conflictos.into_iter().map(|c| c.mensaje).collect(),
        conflict_types: conflict_types.into_iter().collect(),
        valid_topones: validacion.topones_validos.into_iter().map(|t| t.mensaje).collect(),
        valid_topon_types: valid_topon_types.into_iter().collect(),
    }
}

/// Genera todas las combinaciones de horarios para los cursos solicitados.
///
/// Orden del resultado: primero los horarios sin topones, luego los que sólo
/// tienen topones válidos (ambos por puntaje descendente) y al final, si
/// `incluir_conflictos`, los que tienen topones inválidos (menos conflictos
/// primero, luego puntaje descendente). Los empates conservan el orden del
/// producto, así que la salida es determinista.
pub fn generar_horarios(
    catalogo: &Catalogo,
    solicitud: &SolicitudGeneracion,
) -> Result<Vec<HorarioGenerado>, GeneracionError> {
    if solicitud.cursos.is_empty() {
        return Err(GeneracionError::SeleccionVacia);
    }

    let mut opciones_por_curso: Vec<Vec<OpcionSeccion>> = Vec::with_capacity(solicitud.cursos.len());
    for curso in &solicitud.cursos {
        let opciones = resolver_opciones(catalogo, curso, &solicitud.reglas_grupos);
        if opciones.is_empty() {
            warn!("curso {} sin secciones en el catálogo", curso);
            return Err(GeneracionError::SinDatosCatalogo { curso: curso.clone() });
        }
        debug!("{}: {} opciones de sección", curso, opciones.len());
        opciones_por_curso.push(opciones);
    }

    let producto = ProductoCartesiano::new(&opciones_por_curso);
    info!("evaluando {} combinaciones para {:?}", producto.total(), solicitud.cursos);

    let mut sin_topones = Vec::new();
    let mut con_topones_validos = Vec::new();
    let mut con_conflictos = Vec::new();

    for combinacion in producto {
        let horario = evaluar_combinacion(&combinacion, &solicitud.reglas_topones);
        match horario.veredicto {
            Veredicto::SinTopones => sin_topones.push(horario),
            Veredicto::ToponesValidos => con_topones_validos.push(horario),
            Veredicto::ConTopones if solicitud.incluir_conflictos => con_conflictos.push(horario),
            Veredicto::ConTopones => {}
        }
    }

    sin_topones.sort_by(|a, b| b.score.total_cmp(&a.score));
    con_topones_validos.sort_by(|a, b| b.score.total_cmp(&a.score));
    con_conflictos.sort_by(|a, b| {
        a.conflicts
            .len()
            .cmp(&b.conflicts.len())
            .then(b.score.total_cmp(&a.score))
    });

    info!(
        "{} sin topones, {} con topones válidos, {} con topones inválidos",
        sin_topones.len(),
        con_topones_validos.len(),
        con_conflictos.len()
    );

    let mut horarios = sin_topones;
    horarios.append(&mut con_topones_validos);
    horarios.append(&mut con_conflictos);
    Ok(horarios)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FilaCatalogo;

    fn fila(codigo: &str, sec: i64, grp: i64, dia: &str, ini: &str, fin: &str) -> FilaCatalogo {
        FilaCatalogo {
            asig_codigo: codigo.to_string(),
            asig_nombre: format!("Ramo {}", codigo),
            psec_codigo: sec,
            pgru_codigo: grp,
            sdia_descripcion: dia.to_string(),
            sper_hora_ini: ini.to_string(),
            sper_hora_fin: fin.to_string(),
            camp_campus: "CAMPUS ALEMANIA".to_string(),
            extra: Default::default(),
        }
    }

    fn catalogo_con_grupos() -> Catalogo {
        Catalogo::new(vec![
            fila("CES1159", 1, 0, "Lunes", "08:00", "09:30"),
            fila("CES1159", 1, 1, "Miércoles", "08:00", "09:30"),
            fila("CES1159", 2, 0, "Martes", "10:00", "11:30"),
            fila("CES1159", 2, 1, "Jueves", "10:00", "11:30"),
        ])
    }

    #[test]
    fn test_sin_reglas_cada_grupo_es_opcion() {
        let ops = resolver_opciones(&catalogo_con_grupos(), "CES1159", &[]);
        let etiquetas: Vec<(i64, String)> = ops.iter().map(|o| (o.seccion, o.grupo.etiqueta())).collect();
        assert_eq!(etiquetas, vec![
            (1, "0".to_string()),
            (1, "1".to_string()),
            (2, "0".to_string()),
            (2, "1".to_string()),
        ]);
    }

    #[test]
    fn test_regla_combina_grupos_de_la_seccion() {
        let reglas = vec![ReglaGrupos { curso: "CES1159".to_string(), seccion: 1, grupos: vec![0, 1] }];
        let ops = resolver_opciones(&catalogo_con_grupos(), "CES1159", &reglas);
        assert_eq!(ops.len(), 3);
        assert_eq!(ops[0].grupo, Grupo::Combinado(vec![0, 1]));
        assert_eq!(ops[0].bloques.len(), 2);
        assert_eq!(ops[1].grupo, Grupo::Individual(0));
        assert_eq!(ops[1].seccion, 2);
    }

    #[test]
    fn test_regla_con_grupo_inexistente_se_ignora() {
        let reglas = vec![ReglaGrupos { curso: "CES1159".to_string(), seccion: 1, grupos: vec![0, 7] }];
        let ops = resolver_opciones(&catalogo_con_grupos(), "CES1159", &reglas);
        assert_eq!(ops.len(), 4);
        assert!(ops.iter().all(|o| !o.grupo.es_combinado()));
    }

    #[test]
    fn test_regla_de_un_solo_grupo_se_ignora() {
        let reglas = vec![ReglaGrupos { curso: "CES1159".to_string(), seccion: 1, grupos: vec![0] }];
        let ops = resolver_opciones(&catalogo_con_grupos(), "CES1159", &reglas);
        assert_eq!(ops.len(), 4);
    }

    #[test]
    fn test_seleccion_vacia() {
        let sol = SolicitudGeneracion::new(vec![]);
        assert_eq!(generar_horarios(&catalogo_con_grupos(), &sol), Err(GeneracionError::SeleccionVacia));
    }

    #[test]
    fn test_curso_sin_datos_anula_todo() {
        let sol = SolicitudGeneracion::new(vec!["CES1159".to_string(), "NOEXISTE".to_string()]);
        assert_eq!(
            generar_horarios(&catalogo_con_grupos(), &sol),
            Err(GeneracionError::SinDatosCatalogo { curso: "NOEXISTE".to_string() })
        );
    }

    #[test]
    fn test_grupo_combinado_se_serializa_como_texto() {
        let reglas = vec![ReglaGrupos { curso: "CES1159".to_string(), seccion: 1, grupos: vec![0, 1] }];
        let mut sol = SolicitudGeneracion::new(vec!["CES1159".to_string()]);
        sol.reglas_grupos = reglas;
        let horarios = generar_horarios(&catalogo_con_grupos(), &sol).unwrap();
        let json = serde_json::to_value(&horarios).unwrap();
        let grupos: Vec<&serde_json::Value> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|h| &h["sections"][0]["group"])
            .collect();
        assert!(grupos.contains(&&serde_json::json!("0+1")));
        assert!(grupos.contains(&&serde_json::json!(0)));
    }
}
