use calamine::Data;

use crate::algorithm::tiempo::minutos_a_hora;

/// Convierte un `Data` de calamine a String (versión genérica para celdas)
pub fn cell_to_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if (f.floor() - f).abs() < f64::EPSILON {
                format!("{}", *f as i64)
            } else {
                format!("{}", f)
            }
        }
        Data::Int(i) => format!("{}", i),
        Data::Bool(b) => format!("{}", b),
        Data::Empty => String::new(),
        Data::Error(_) => String::new(),
        Data::DateTime(s) => s.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Celda de hora: Excel guarda las horas como fracción del día, las
/// convertimos a "HH:MM". Textos se devuelven tal cual (recortados).
pub fn celda_hora(c: &Data) -> String {
    match c {
        Data::Float(f) if (0.0..1.0).contains(f) => fraccion_a_hora(*f),
        Data::DateTime(dt) => fraccion_a_hora(dt.as_f64().fract()),
        other => cell_to_string(other),
    }
}

fn fraccion_a_hora(fraccion: f64) -> String {
    let minutos = (fraccion * 24.0 * 60.0).round() as i32;
    minutos_a_hora(minutos.rem_euclid(24 * 60))
}

/// Celda numérica entera; vacía o no numérica vale `defecto`.
pub fn celda_entero(c: &Data, defecto: i64) -> i64 {
    match c {
        Data::Int(i) => *i,
        Data::Float(f) => *f as i64,
        Data::String(s) => {
            let t = s.trim();
            t.parse::<i64>()
                .ok()
                .or_else(|| t.parse::<f64>().ok().map(|f| f as i64))
                .unwrap_or(defecto)
        }
        _ => defecto,
    }
}

/// Normaliza encabezados eliminando espacios y pasando a minúsculas.
pub fn normalize_header(s: &str) -> String {
    s.to_lowercase().chars().filter(|c| !c.is_whitespace()).collect()
}
