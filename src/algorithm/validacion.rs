// Validación de una combinación de secciones (una por curso).
use crate::algorithm::conflict::{bloques_se_solapan, verificar_traslado};
use crate::algorithm::topones::es_topon_valido;
use crate::models::{Bloque, Conflicto, ReglaTopon, TipoConflicto, ToponAceptado};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultadoValidacion {
    pub es_valido: bool,
    pub conflictos: Vec<Conflicto>,
    pub topones_validos: Vec<ToponAceptado>,
}

/// Verifica cada par de bloques de la combinación.
///
/// `secciones` trae los bloques de cada opción elegida. Los bloques de una
/// misma opción nunca se comparan entre sí. Un solapamiento se acepta si
/// coincide con un topón registrado; si no, es conflicto `overlap`. Bloques
/// que no se solapan pasan por el chequeo de traslado (`travel_time`).
pub fn validar_combinacion(secciones: &[&[Bloque]], reglas: &[ReglaTopon]) -> ResultadoValidacion {
    let todos: Vec<(usize, &Bloque)> = secciones
        .iter()
        .enumerate()
        .flat_map(|(i, bloques)| bloques.iter().map(move |b| (i, b)))
        .collect();

    let mut conflictos = Vec::new();
    let mut topones_validos = Vec::new();

    for i in 0..todos.len() {
        let (dueno_i, b1) = todos[i];
        for &(dueno_j, b2) in &todos[i + 1..] {
            if dueno_i == dueno_j {
                continue;
            }
            if bloques_se_solapan(b1, b2) {
                match es_topon_valido(b1, b2, reglas) {
                    (true, Some(tipo)) => topones_validos.push(ToponAceptado {
                        tipo,
                        bloque1: b1.clone(),
                        bloque2: b2.clone(),
                        mensaje: format!("Topón válido ({}): {} y {} el {}", tipo.as_str(), b1.curso, b2.curso, b1.dia),
                    }),
                    _ => conflictos.push(Conflicto {
                        tipo: TipoConflicto::Solapamiento,
                        bloque1: b1.clone(),
                        bloque2: b2.clone(),
                        mensaje: format!("Topón horario: {} y {} el {}", b1.curso, b2.curso, b1.dia),
                    }),
                }
            } else if let (false, mensaje) = verificar_traslado(b1, b2) {
                conflictos.push(Conflicto {
                    tipo: TipoConflicto::TiempoTraslado,
                    bloque1: b1.clone(),
                    bloque2: b2.clone(),
                    mensaje: mensaje.unwrap_or_default(),
                });
            }
        }
    }

    ResultadoValidacion {
        es_valido: conflictos.is_empty(),
        conflictos,
        topones_validos,
    }
}
