//! La red de reacciones: estados vivos, aristas tipadas y lista negra.
//!
//! La red solo crece durante la generación; la única salida de un estado es
//! la lista negra de exclusión competitiva, y queda registrada. El
//! fingerprint estructural es la condición de parada del motor y la base de
//! la comparación red-a-red.

use crate::constants::ENGINE_VERSION;
use crate::hashing::hash_value;
use crate::state::State;
use crate::transition::StateTransition;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Arista dirigida de la red.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: Uuid,
    pub target: Uuid,
    pub transition: StateTransition,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Network {
    states: IndexMap<Uuid, State>,
    edges: Vec<Edge>,
    blacklist: Vec<State>,
    pub converged: bool,
    pub sweeps: usize,
    pub generated_at: Option<DateTime<Utc>>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn states(&self) -> impl Iterator<Item = &State> {
        self.states.values()
    }

    pub fn state(&self, id: Uuid) -> Option<&State> {
        self.states.get(&id)
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn blacklisted_states(&self) -> &[State] {
        &self.blacklist
    }

    pub fn find_state_by_symbol(&self, symbol: &str) -> Option<&State> {
        self.states.values().find(|s| s.symbol() == Some(symbol))
    }

    pub fn find_state_by_number(&self, number: u32) -> Option<&State> {
        self.states.values().find(|s| s.number() == Some(number))
    }

    pub(crate) fn states_mut(&mut self) -> impl Iterator<Item = &mut State> {
        self.states.values_mut()
    }

    pub(crate) fn edges_mut(&mut self) -> &mut [Edge] {
        &mut self.edges
    }

    /// Inserta un estado canónico con deduplicación por clave de contenido.
    /// Devuelve el id residente (nuevo o existente), o `None` si el estado
    /// está vetado por la lista negra: los barridos posteriores no deben
    /// resucitar lo excluido.
    pub(crate) fn add_state_dedup(&mut self, state: State) -> Option<Uuid> {
        let key = state.content_key();
        if self.blacklist.iter().any(|b| b.content_key() == key) {
            return None;
        }
        if let Some(existing) = self.states.values().find(|s| s.content_key() == key) {
            return Some(existing.id());
        }
        let id = state.id();
        self.states.insert(id, state);
        Some(id)
    }

    /// Inserta una arista si no existe ya otra con el mismo origen, destino
    /// y tipo de transición. Devuelve si la red cambió.
    pub(crate) fn add_edge_dedup(&mut self,
                                 source: Uuid,
                                 target: Uuid,
                                 transition: StateTransition)
                                 -> bool {
        let duplicate = self.edges.iter().any(|e| {
                                              e.source == source
                                              && e.target == target
                                              && e.transition.kind == transition.kind
                                              && e.transition.reversibility == transition.reversibility
                                              && e.transition.reference_forward
                                                 == transition.reference_forward
                                          });
        if duplicate {
            return false;
        }
        self.edges.push(Edge { source, target, transition });
        true
    }

    /// Saca un estado del grafo vivo hacia la lista negra, junto con sus
    /// aristas incidentes.
    pub(crate) fn blacklist_state(&mut self, id: Uuid) {
        if let Some(state) = self.states.shift_remove(&id) {
            self.edges.retain(|e| e.source != id && e.target != id);
            self.blacklist.push(state);
        }
    }

    /// Fingerprint estructural de la red: hash sobre las claves de contenido
    /// ordenadas de estados, aristas y lista negra. Independiente de ids y
    /// del orden de inserción.
    pub fn fingerprint(&self) -> String {
        let mut state_keys: Vec<String> = self.states.values().map(State::content_key).collect();
        state_keys.sort_unstable();

        let mut edge_keys: Vec<String> =
            self.edges
                .iter()
                .map(|e| {
                    let source = self.states.get(&e.source).map(State::content_key).unwrap_or_default();
                    let target = self.states.get(&e.target).map(State::content_key).unwrap_or_default();
                    format!("{}|{}|{:?}|{:?}|{:?}",
                            source,
                            target,
                            e.transition.kind,
                            e.transition.reversibility,
                            e.transition.reference_forward)
                })
                .collect();
        edge_keys.sort_unstable();

        let mut blacklist_keys: Vec<String> = self.blacklist.iter().map(State::content_key).collect();
        blacklist_keys.sort_unstable();

        hash_value(&serde_json::json!({
                       "engine": ENGINE_VERSION,
                       "states": state_keys,
                       "edges": edge_keys,
                       "blacklist": blacklist_keys,
                   }))
    }

    /// Igualdad estructural red-a-red, sin mirar ids ni anotaciones.
    pub fn structurally_equal(&self, other: &Network) -> bool {
        self.fingerprint() == other.fingerprint()
    }
}
