// Conversión de horas "HH:MM" a minutos desde medianoche.

/// Parsea "HH:MM" (también acepta "HH:MM:SS", los segundos se ignoran).
pub fn hora_a_minutos_opt(hora: &str) -> Option<i32> {
    let mut partes = hora.trim().split(':');
    let hh = partes.next()?.trim().parse::<i32>().ok()?;
    let mm = partes.next()?.trim().parse::<i32>().ok()?;
    hh.checked_mul(60)?.checked_add(mm)
}

/// Igual que `hora_a_minutos_opt` pero nunca falla: una hora mal formada
/// vale 0 y la generación sigue adelante.
pub fn hora_a_minutos(hora: &str) -> i32 {
    hora_a_minutos_opt(hora).unwrap_or(0)
}

/// Formatea minutos desde medianoche como "HH:MM".
pub fn minutos_a_hora(minutos: i32) -> String {
    format!("{:02}:{:02}", minutos / 60, minutos % 60)
}
