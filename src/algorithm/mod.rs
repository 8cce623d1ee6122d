// Núcleo del generador de horarios.
// Declarar submódulos (archivos en la carpeta `src/algorithm`)
pub mod tiempo;
pub mod campus;
pub mod conflict;
pub mod topones;
pub mod validacion;
pub mod puntaje;
pub mod producto;
pub mod generador;

// Reexportar la API pública usada por el servidor
pub use conflict::{bloques_se_solapan, verificar_traslado};
pub use generador::{evaluar_combinacion, generar_horarios, resolver_opciones, SolicitudGeneracion};
pub use puntaje::calcular_puntaje;
pub use tiempo::hora_a_minutos;
pub use topones::es_topon_valido;
pub use validacion::{validar_combinacion, ResultadoValidacion};
