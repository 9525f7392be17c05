//! Motor de expansión de redes de reacción.
//!
//! A partir de un catálogo (fármacos y proteínas multiconformación) y una
//! lista de reglas de interacción, el motor genera el grafo dirigido de
//! estados (complejos moleculares) y transiciones tipadas, por reescritura
//! combinatoria restringida hasta punto fijo estructural.

pub mod constants;
pub mod engine;
pub mod errors;
pub mod event;
pub mod hashing;
pub mod model;
pub mod network;
pub mod state;
pub mod transition;

pub(crate) mod combinatorics;

pub use constants::{DEFAULT_SWEEP_LIMIT, ENGINE_VERSION};
pub use engine::{annotate, generate, GenerationOptions};
pub use errors::CoreEngineError;
pub use event::{EventJournal, GenerationEvent, GenerationEventKind};
pub use model::{find_next_model_number, Model};
pub use network::{Edge, Network};
pub use state::{ComponentRef, ConformedProtein, Link, LinkEndpoint, State};
pub use transition::{StateTransition, TransitionKind};
