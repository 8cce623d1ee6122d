// Puntaje de un horario: mayor puntaje = mejor horario.
use crate::algorithm::tiempo::hora_a_minutos;
use crate::models::Bloque;
use std::collections::BTreeMap;

/// Suma de tres componentes:
/// - `(7 - dias_usados) * 100`: menos días es mejor
/// - menos el tiempo muerto (minutos entre bloques consecutivos de cada día)
/// - menos el promedio de hora de inicio / 10: más temprano es mejor
///
/// Un horario sin bloques vale 0.
pub fn calcular_puntaje(bloques: &[&Bloque]) -> f64 {
    if bloques.is_empty() {
        return 0.0;
    }

    let mut por_dia: BTreeMap<&str, Vec<(i32, i32)>> = BTreeMap::new();
    for b in bloques {
        por_dia
            .entry(b.dia.as_str())
            .or_default()
            .push((hora_a_minutos(&b.hora_ini), hora_a_minutos(&b.hora_fin)));
    }

    let puntaje_dias = (7 - por_dia.len() as i64) * 100;

    let mut tiempo_muerto: i64 = 0;
    for franjas in por_dia.values_mut() {
        franjas.sort_by_key(|&(ini, _)| ini);
        for par in franjas.windows(2) {
            let (_, fin_actual) = par[0];
            let (ini_siguiente, _) = par[1];
            tiempo_muerto += (ini_siguiente - fin_actual).max(0) as i64;
        }
    }

    let suma_inicios: i64 = bloques.iter().map(|b| hora_a_minutos(&b.hora_ini) as i64).sum();
    let inicio_promedio = suma_inicios as f64 / bloques.len() as f64;

    puntaje_dias as f64 - tiempo_muerto as f64 - inicio_promedio / 10.0
}
