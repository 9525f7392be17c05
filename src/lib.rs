//! BiKiNet
//!
//! Librería de fachada del generador de redes de reacción bioquímicas:
//! - `biki_domain` aporta el catálogo (fármacos, proteínas multiconformación)
//!   y las reglas de interacción con sus firmas de conteo.
//! - `biki_core` aporta estados, transiciones, el motor de generación hasta
//!   punto fijo, la anotación y los modelos.
//!
//! Puede usarse desde `main.rs` o por otros crates/clientes.

pub use biki_core::{find_next_model_number, GenerationOptions, Model, Network};
pub use biki_domain::{Drug, Protein, Rule, RuleKind, RuleSlot};
