//! Normalización de campus a zonas canónicas y buffer de traslado requerido.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZonaCampus {
    /// Campus Alemania (incluye sede Rivas).
    Alemania,
    /// Campus San Juan Pablo II: exige un buffer mayor con cualquier otro campus.
    SanJuanPablo,
    Virtual,
    Otro,
}

/// Minutos de traslado entre campus distintos.
pub const TRASLADO_MINUTOS: i32 = 10;
/// Minutos de traslado cuando uno de los dos bloques es en San Juan Pablo II.
pub const TRASLADO_SAN_JUAN_PABLO_MINUTOS: i32 = 30;

/// Mapea la etiqueta libre del Excel a una zona.
pub fn normalizar_campus(campus: &str) -> ZonaCampus {
    let c = campus.to_uppercase();
    if c.contains("ALEMANIA") || c.contains("RIVAS") {
        ZonaCampus::Alemania
    } else if c.contains("SAN JUAN PABLO") || c.contains("JUAN PABLO") || c.contains("SJPII") || c.contains("CJP") {
        ZonaCampus::SanJuanPablo
    } else if c.contains("VIRTUAL") || c.contains("ONLINE") {
        ZonaCampus::Virtual
    } else {
        ZonaCampus::Otro
    }
}

/// Minutos mínimos entre dos bloques del mismo día según sus zonas.
/// `None` si no hay traslado (virtual o misma zona).
pub fn traslado_requerido(a: ZonaCampus, b: ZonaCampus) -> Option<i32> {
    if a == ZonaCampus::Virtual || b == ZonaCampus::Virtual || a == b {
        return None;
    }
    if a == ZonaCampus::SanJuanPablo || b == ZonaCampus::SanJuanPablo {
        Some(TRASLADO_SAN_JUAN_PABLO_MINUTOS)
    } else {
        Some(TRASLADO_MINUTOS)
    }
}
