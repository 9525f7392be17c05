//! Transiciones de estado: las aristas tipadas del grafo de reacciones.

use biki_domain::Reversibility;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Clase estructural de una transición.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionKind {
    Association,
    Dissociation,
    Conversion,
}

/// Una transición dirigida entre dos estados.
///
/// `reference_forward` solo se rellena en conversiones: `Some(true)` si la
/// arista sigue el sentido de referencia de su regla, `Some(false)` si es la
/// inversa estructural. Las clases de asociación y disociación no la
/// necesitan: su sentido se lee del número de componentes a cada lado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    id: Uuid,
    pub kind: TransitionKind,
    pub reversibility: Reversibility,
    pub reference_forward: Option<bool>,
    pub number: Option<i64>,
    pub variable: Option<String>,
}

impl StateTransition {
    pub fn new(kind: TransitionKind, reversibility: Reversibility) -> Self {
        StateTransition { id: Uuid::new_v4(),
                          kind,
                          reversibility,
                          reference_forward: None,
                          number: None,
                          variable: None }
    }

    pub fn new_conversion(reversibility: Reversibility, reference_forward: bool) -> Self {
        StateTransition { id: Uuid::new_v4(),
                          kind: TransitionKind::Conversion,
                          reversibility,
                          reference_forward: Some(reference_forward),
                          number: None,
                          variable: None }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}
