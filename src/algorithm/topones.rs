//! Topones válidos: solapamientos pre-registrados entre un bloque de un curso
//! ancla y un bloque de otro curso que se toleran por política.

use crate::algorithm::conflict::intervalo;
use crate::models::{Bloque, ReglaTopon, TipoTopon};

/// Verifica si el topón entre `b1` y `b2` está registrado en `reglas`.
///
/// Una regla aplica cuando exactamente uno de los dos bloques es del curso
/// ancla de la regla y ese bloque coincide con la regla en sección, día,
/// inicio y fin. Para reglas `completo` el otro bloque debe cubrir todo el
/// bloque ancla; si no lo cubre se acepta igual pero como `parcial`.
///
/// Retorna `(es_topon_valido, tipo)`; la primera regla que coincide gana.
pub fn es_topon_valido(b1: &Bloque, b2: &Bloque, reglas: &[ReglaTopon]) -> (bool, Option<TipoTopon>) {
    for regla in reglas {
        let (ancla, otro) = match (b1.curso == regla.curso_ancla, b2.curso == regla.curso_ancla) {
            (true, false) => (b1, b2),
            (false, true) => (b2, b1),
            _ => continue,
        };
        if !regla.coincide_con(ancla) {
            continue;
        }

        let tipo = match regla.tipo {
            TipoTopon::Completo => {
                let (ancla_ini, ancla_fin) = intervalo(ancla);
                let (otro_ini, otro_fin) = intervalo(otro);
                if otro_ini <= ancla_ini && otro_fin >= ancla_fin {
                    TipoTopon::Completo
                } else {
                    TipoTopon::Parcial
                }
            }
            TipoTopon::Parcial => TipoTopon::Parcial,
        };
        return (true, Some(tipo));
    }
    (false, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CURSO_ANCLA_POR_DEFECTO;

    fn bloque(curso: &str, seccion: i64, ini: &str, fin: &str) -> Bloque {
        Bloque {
            curso: curso.to_string(),
            nombre: String::new(),
            seccion,
            grupo: 1,
            dia: "Lunes".to_string(),
            hora_ini: ini.to_string(),
            hora_fin: fin.to_string(),
            campus: "CAMPUS ALEMANIA".to_string(),
        }
    }

    fn regla(seccion: i64, ini: &str, fin: &str, tipo: TipoTopon) -> ReglaTopon {
        ReglaTopon {
            curso_ancla: CURSO_ANCLA_POR_DEFECTO.to_string(),
            seccion,
            dia: "Lunes".to_string(),
            hora_ini: ini.to_string(),
            hora_fin: fin.to_string(),
            tipo,
        }
    }

    #[test]
    fn test_completo_coincidencia_exacta() {
        let ancla = bloque("BACH1121", 1, "08:00", "10:00");
        let otro = bloque("MAT1001", 2, "08:00", "10:00");
        let reglas = vec![regla(1, "08:00", "10:00", TipoTopon::Completo)];
        assert_eq!(es_topon_valido(&ancla, &otro, &reglas), (true, Some(TipoTopon::Completo)));
        assert_eq!(es_topon_valido(&otro, &ancla, &reglas), (true, Some(TipoTopon::Completo)));
    }

    #[test]
    fn test_completo_otro_bloque_mas_amplio() {
        let ancla = bloque("BACH1121", 1, "08:00", "10:00");
        let otro = bloque("MAT1001", 2, "07:30", "10:30");
        let reglas = vec![regla(1, "08:00", "10:00", TipoTopon::Completo)];
        assert_eq!(es_topon_valido(&otro, &ancla, &reglas), (true, Some(TipoTopon::Completo)));
    }

    #[test]
    fn test_completo_cobertura_parcial_se_degrada() {
        let ancla = bloque("BACH1121", 1, "08:00", "10:00");
        let otro = bloque("MAT1001", 2, "08:30", "10:00");
        let reglas = vec![regla(1, "08:00", "10:00", TipoTopon::Completo)];
        assert_eq!(es_topon_valido(&ancla, &otro, &reglas), (true, Some(TipoTopon::Parcial)));
    }

    #[test]
    fn test_parcial_acepta_cualquier_solapamiento() {
        let ancla = bloque("BACH1121", 5, "08:00", "10:00");
        let otro = bloque("MAT1001", 2, "09:50", "11:00");
        let reglas = vec![regla(5, "08:00", "10:00", TipoTopon::Parcial)];
        assert_eq!(es_topon_valido(&ancla, &otro, &reglas), (true, Some(TipoTopon::Parcial)));
    }

    #[test]
    fn test_sin_regla_coincidente() {
        let ancla = bloque("BACH1121", 1, "08:00", "10:00");
        let otro = bloque("MAT1001", 2, "08:00", "10:00");
        // otra sección
        let reglas = vec![regla(2, "08:00", "10:00", TipoTopon::Parcial)];
        assert_eq!(es_topon_valido(&ancla, &otro, &reglas), (false, None));
        // sin reglas
        assert_eq!(es_topon_valido(&ancla, &otro, &[]), (false, None));
    }

    #[test]
    fn test_ningun_bloque_es_ancla() {
        let a = bloque("FIS1001", 1, "08:00", "10:00");
        let b = bloque("MAT1001", 1, "08:00", "10:00");
        let reglas = vec![regla(1, "08:00", "10:00", TipoTopon::Parcial)];
        assert_eq!(es_topon_valido(&a, &b, &reglas), (false, None));
    }

    #[test]
    fn test_ancla_configurable_por_regla() {
        let ancla = bloque("ING1000", 3, "08:00", "10:00");
        let otro = bloque("MAT1001", 1, "08:00", "10:00");
        let mut r = regla(3, "08:00", "10:00", TipoTopon::Completo);
        r.curso_ancla = "ING1000".to_string();
        assert_eq!(es_topon_valido(&otro, &ancla, &[r]), (true, Some(TipoTopon::Completo)));
    }
}
