//! Producto cartesiano perezoso sobre listas de opciones.
//!
//! Recorre las combinaciones como un odómetro (la última lista avanza
//! primero), el mismo orden que un producto anidado de bucles. No
//! materializa el producto: cada `next()` construye sólo la tupla actual.

pub struct ProductoCartesiano<'a, T> {
    listas: &'a [Vec<T>],
    indices: Vec<usize>,
    terminado: bool,
}

impl<'a, T> ProductoCartesiano<'a, T> {
    pub fn new(listas: &'a [Vec<T>]) -> Self {
        let terminado = listas.iter().any(|l| l.is_empty());
        ProductoCartesiano { listas, indices: vec![0; listas.len()], terminado }
    }

    /// Número total de combinaciones (satura en `usize::MAX`).
    pub fn total(&self) -> usize {
        self.listas.iter().fold(1usize, |acc, l| acc.saturating_mul(l.len()))
    }

    fn avanzar(&mut self) {
        for pos in (0..self.indices.len()).rev() {
            self.indices[pos] += 1;
            if self.indices[pos] < self.listas[pos].len() {
                return;
            }
            self.indices[pos] = 0;
        }
        self.terminado = true;
    }
}

impl<'a, T> Iterator for ProductoCartesiano<'a, T> {
    type Item = Vec<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.terminado {
            return None;
        }
        let listas = self.listas;
        let tupla = self.indices.iter().enumerate().map(|(pos, &i)| &listas[pos][i]).collect();
        self.avanzar();
        Some(tupla)
    }
}
