// Funciones para detectar topones entre bloques: solapamiento y tiempo de traslado.
use crate::algorithm::campus::{normalizar_campus, traslado_requerido, ZonaCampus};
use crate::algorithm::tiempo::hora_a_minutos;
use crate::models::Bloque;

/// Intervalo [inicio, fin) en minutos de un bloque.
pub fn intervalo(b: &Bloque) -> (i32, i32) {
    (hora_a_minutos(&b.hora_ini), hora_a_minutos(&b.hora_fin))
}

/// Verifica si dos rangos de horas se solapan
/// (inicio1, fin1) y (inicio2, fin2) en minutos; los extremos que se tocan no solapan.
pub fn horas_se_solapan(h1: (i32, i32), h2: (i32, i32)) -> bool {
    !(h1.1 <= h2.0 || h2.1 <= h1.0)
}

/// True si ambos bloques son el mismo día y sus intervalos se intersectan.
pub fn bloques_se_solapan(b1: &Bloque, b2: &Bloque) -> bool {
    if b1.dia != b2.dia {
        return false;
    }
    horas_se_solapan(intervalo(b1), intervalo(b2))
}

/// Verifica que haya tiempo de traslado suficiente entre dos bloques del
/// mismo día que no se solapan. Devuelve `(es_valido, mensaje_error)`.
///
/// - virtual o misma zona: sin restricción
/// - San Juan Pablo II con cualquier otro campus: 30 minutos
/// - otros campus entre sí: 10 minutos
///
/// El mensaje nombra primero el bloque que termina antes.
pub fn verificar_traslado(b1: &Bloque, b2: &Bloque) -> (bool, Option<String>) {
    if b1.dia != b2.dia {
        return (true, None);
    }

    let zona1 = normalizar_campus(&b1.campus);
    let zona2 = normalizar_campus(&b2.campus);
    let requerido = match traslado_requerido(zona1, zona2) {
        Some(r) => r,
        None => return (true, None),
    };

    let (ini1, fin1) = intervalo(b1);
    let (ini2, fin2) = intervalo(b2);

    let (antes, despues, brecha) = if fin1 <= ini2 {
        (b1, b2, ini2 - fin1)
    } else if fin2 <= ini1 {
        (b2, b1, ini1 - fin2)
    } else {
        // se solapan: eso lo resuelve el chequeo de solapamiento
        return (true, None);
    };

    if brecha >= requerido {
        return (true, None);
    }

    let tipo = if zona1 == ZonaCampus::SanJuanPablo || zona2 == ZonaCampus::SanJuanPablo {
        "Topón de campus (San Juan Pablo II)"
    } else {
        "Topón de campus"
    };
    let mensaje = format!(
        "{}: {} ({}) y {} ({}) - necesitan {} min",
        tipo, antes.curso, antes.campus, despues.curso, despues.campus, requerido
    );
    (false, Some(mensaje))
}
