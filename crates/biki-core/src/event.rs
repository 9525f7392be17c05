//! Diario de eventos de generación.
//!
//! El motor no registra con un logger: emite eventos tipados a un diario
//! append-only que el colaborador de edición puede inspeccionar. El
//! diagnóstico obligatorio al agotar el techo de barridos vive aquí.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GenerationEventKind {
    /// Arranque de una generación con el tamaño del catálogo y de la lista
    /// de reglas.
    GenerationStarted {
        drug_count: usize,
        protein_count: usize,
        rule_count: usize,
    },
    /// Fin de un barrido completo de reglas, con el fingerprint estructural
    /// de la red en ese punto.
    SweepCompleted {
        sweep: usize,
        state_count: usize,
        edge_count: usize,
        fingerprint: String,
    },
    /// Un estado salió del grafo vivo por exclusión competitiva. Queda en la
    /// lista negra, nunca se borra en silencio.
    StateBlacklisted { state_id: Uuid, rule_id: Uuid },
    /// La red dejó de cambiar: punto fijo alcanzado.
    FixpointReached { sweeps: usize },
    /// Se agotó el techo de barridos sin estabilización estructural. La red
    /// se devuelve igualmente, marcada como posiblemente incompleta.
    SweepCeilingReached { limit: usize },
    /// Cierre de la generación.
    GenerationCompleted {
        state_count: usize,
        edge_count: usize,
        converged: bool,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationEvent {
    pub seq: u64,
    pub ts: DateTime<Utc>,
    pub kind: GenerationEventKind,
}

/// Diario append-only de eventos de generación.
#[derive(Debug, Clone, Default)]
pub struct EventJournal {
    events: Vec<GenerationEvent>,
}

impl EventJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, kind: GenerationEventKind) {
        let event = GenerationEvent { seq: self.events.len() as u64,
                                      ts: Utc::now(),
                                      kind };
        self.events.push(event);
    }

    pub fn list(&self) -> &[GenerationEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
