//! Motor de generación: expansión combinatoria de reglas hasta punto fijo.

mod annotate;
mod association;
mod competition;
mod conversion;
mod core;
mod dissociation;

pub use annotate::annotate;
pub use core::{generate, GenerationOptions};
