//! Catálogo de horarios (consolidado) en memoria.
//!
//! `Catalogo` es inmutable una vez construido. `CatalogoCompartido` guarda
//! el catálogo vigente detrás de un `Arc`: cada generación toma una
//! instantánea con `snapshot()` y las ediciones construyen un catálogo
//! nuevo completo que se publica con `reemplazar()`, de modo que ninguna
//! generación observa un catálogo a medio actualizar.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

use crate::models::{Bloque, CursoResumen, EstructuraSeccion, FilaCatalogo, HorarioAncla, TipoTopon};

#[derive(Debug, Clone, Default)]
pub struct Catalogo {
    filas: Vec<FilaCatalogo>,
    bloques: Vec<Bloque>,
    // curso -> índices en `bloques`, en el orden del Excel
    por_curso: HashMap<String, Vec<usize>>,
}

impl Catalogo {
    pub fn new(filas: Vec<FilaCatalogo>) -> Self {
        let bloques: Vec<Bloque> = filas.iter().map(FilaCatalogo::a_bloque).collect();
        let mut por_curso: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, b) in bloques.iter().enumerate() {
            por_curso.entry(b.curso.clone()).or_default().push(i);
        }
        Catalogo { filas, bloques, por_curso }
    }

    pub fn filas(&self) -> &[FilaCatalogo] {
        &self.filas
    }

    pub fn len(&self) -> usize {
        self.bloques.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bloques.is_empty()
    }

    fn bloques_de_curso<'a>(&'a self, curso: &str) -> impl Iterator<Item = &'a Bloque> + 'a {
        self.por_curso
            .get(curso)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(move |&i| &self.bloques[i])
    }

    /// Cursos únicos (código y primer nombre encontrado), ordenados por código.
    pub fn cursos(&self) -> Vec<CursoResumen> {
        let mut cursos: BTreeMap<&str, &str> = BTreeMap::new();
        for b in &self.bloques {
            cursos.entry(b.curso.as_str()).or_insert(b.nombre.as_str());
        }
        cursos
            .into_iter()
            .map(|(codigo, nombre)| CursoResumen { asig_codigo: codigo.to_string(), asig_nombre: nombre.to_string() })
            .collect()
    }

    /// Pares (sección, grupo) únicos del curso, ordenados.
    pub fn secciones_de_curso(&self, curso: &str) -> Vec<(i64, i64)> {
        let set: BTreeSet<(i64, i64)> = self.bloques_de_curso(curso).map(|b| (b.seccion, b.grupo)).collect();
        set.into_iter().collect()
    }

    /// Bloques de una sección y grupo específicos, en el orden del Excel.
    pub fn bloques_de_seccion(&self, curso: &str, seccion: i64, grupo: i64) -> Vec<Bloque> {
        self.bloques_de_curso(curso)
            .filter(|b| b.seccion == seccion && b.grupo == grupo)
            .cloned()
            .collect()
    }

    /// Estructura de secciones y grupos de un curso, para configurar grupos obligatorios.
    pub fn estructura(&self, curso: &str) -> Vec<EstructuraSeccion> {
        let mut por_seccion: BTreeMap<i64, Vec<i64>> = BTreeMap::new();
        for (seccion, grupo) in self.secciones_de_curso(curso) {
            por_seccion.entry(seccion).or_default().push(grupo);
        }
        por_seccion
            .into_iter()
            .map(|(section, groups)| EstructuraSeccion { section, groups })
            .collect()
    }

    /// Cada bloque individual de `curso`, para configurar topones válidos.
    /// Las secciones 1 a 4 se sugieren como topón completo, el resto parcial.
    pub fn horarios_ancla(&self, curso: &str) -> Vec<HorarioAncla> {
        let mut out: Vec<HorarioAncla> = self
            .bloques_de_curso(curso)
            .map(|b| {
                let tapon_type = if (1..=4).contains(&b.seccion) { TipoTopon::Completo } else { TipoTopon::Parcial };
                HorarioAncla {
                    id: format!("{}_{}_{}_{}_{}", b.seccion, b.grupo, b.dia, b.hora_ini, b.hora_fin),
                    section: b.seccion,
                    group: b.grupo,
                    dia: b.dia.clone(),
                    hora_ini: b.hora_ini.clone(),
                    hora_fin: b.hora_fin.clone(),
                    tapon_type,
                    campus: b.campus.clone(),
                    display: format!(
                        "Sección {} - {} {} a {} ({})",
                        b.seccion, b.dia, b.hora_ini, b.hora_fin, tapon_type.as_str()
                    ),
                }
            })
            .collect();
        out.sort_by(|a, b| {
            a.section
                .cmp(&b.section)
                .then(orden_dia(&a.dia).cmp(&orden_dia(&b.dia)))
                .then(a.hora_ini.cmp(&b.hora_ini))
        });
        out
    }
}

/// Posición del día en la semana; días desconocidos van al final.
pub fn orden_dia(dia: &str) -> u8 {
    match dia.trim() {
        "Lunes" => 1,
        "Martes" => 2,
        "Miercoles" | "Miércoles" => 3,
        "Jueves" => 4,
        "Viernes" => 5,
        "Sabado" | "Sábado" => 6,
        _ => 99,
    }
}

/// Catálogo vigente compartido entre handlers.
#[derive(Debug, Default)]
pub struct CatalogoCompartido {
    actual: RwLock<Arc<Catalogo>>,
}

impl CatalogoCompartido {
    pub fn new(catalogo: Catalogo) -> Self {
        CatalogoCompartido { actual: RwLock::new(Arc::new(catalogo)) }
    }

    /// Instantánea inmutable del catálogo vigente.
    pub fn snapshot(&self) -> Arc<Catalogo> {
        let guard = self.actual.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Publica un catálogo nuevo. Las instantáneas tomadas antes siguen vigentes.
    pub fn reemplazar(&self, catalogo: Catalogo) {
        let nuevo = Arc::new(catalogo);
        let mut guard = self.actual.write().unwrap_or_else(|e| e.into_inner());
        *guard = nuevo;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fila(codigo: &str, nombre: &str, sec: i64, grp: i64, dia: &str, ini: &str, fin: &str) -> FilaCatalogo {
        FilaCatalogo {
            asig_codigo: codigo.to_string(),
            asig_nombre: nombre.to_string(),
            psec_codigo: sec,
            pgru_codigo: grp,
            sdia_descripcion: dia.to_string(),
            sper_hora_ini: ini.to_string(),
            sper_hora_fin: fin.to_string(),
            camp_campus: "CAMPUS ALEMANIA".to_string(),
            extra: BTreeMap::new(),
        }
    }

    fn catalogo() -> Catalogo {
        Catalogo::new(vec![
            fila("MAT1", "Cálculo", 2, 1, "Martes", "10:00", "11:30"),
            fila("MAT1", "Cálculo", 1, 2, "Lunes", "08:00", "09:30"),
            fila("MAT1", "Cálculo", 1, 1, "Lunes", "10:00", "11:30"),
            fila("MAT1", "Cálculo II", 1, 1, "Jueves", "10:00", "11:30"),
            fila("BACH1121", "Bachillerato", 5, 1, "Lunes", "08:00", "10:00"),
            fila("BACH1121", "Bachillerato", 1, 1, "Miércoles", "08:00", "10:00"),
            fila("BACH1121", "Bachillerato", 1, 1, "Lunes", "12:00", "13:00"),
        ])
    }

    #[test]
    fn test_cursos_unicos_ordenados() {
        let c = catalogo().cursos();
        assert_eq!(c.len(), 2);
        assert_eq!(c[0].asig_codigo, "BACH1121");
        assert_eq!(c[1].asig_codigo, "MAT1");
        assert_eq!(c[1].asig_nombre, "Cálculo");
    }

    #[test]
    fn test_secciones_y_bloques() {
        let cat = catalogo();
        assert_eq!(cat.secciones_de_curso("MAT1"), vec![(1, 1), (1, 2), (2, 1)]);
        assert!(cat.secciones_de_curso("NOEXISTE").is_empty());
        let b = cat.bloques_de_seccion("MAT1", 1, 1);
        assert_eq!(b.len(), 2);
        assert_eq!(b[0].dia, "Lunes");
        assert_eq!(b[1].dia, "Jueves");
    }

    #[test]
    fn test_estructura() {
        let e = catalogo().estructura("MAT1");
        assert_eq!(e, vec![
            EstructuraSeccion { section: 1, groups: vec![1, 2] },
            EstructuraSeccion { section: 2, groups: vec![1] },
        ]);
    }

    #[test]
    fn test_horarios_ancla_orden_y_tipo() {
        let h = catalogo().horarios_ancla("BACH1121");
        let ids: Vec<&str> = h.iter().map(|x| x.id.as_str()).collect();
        assert_eq!(ids, vec![
            "1_1_Lunes_12:00_13:00",
            "1_1_Miércoles_08:00_10:00",
            "5_1_Lunes_08:00_10:00",
        ]);
        assert_eq!(h[0].tapon_type, TipoTopon::Completo);
        assert_eq!(h[2].tapon_type, TipoTopon::Parcial);
        assert_eq!(h[2].display, "Sección 5 - Lunes 08:00 a 10:00 (parcial)");
    }

    #[test]
    fn test_snapshot_sobrevive_reemplazo() {
        let compartido = CatalogoCompartido::new(catalogo());
        let antes = compartido.snapshot();
        compartido.reemplazar(Catalogo::default());
        assert_eq!(antes.len(), 7);
        assert!(compartido.snapshot().is_empty());
    }
}
