//! Fase de competición: exclusión mutua de componentes co-unidos.
//!
//! Una regla de competición veta los estados donde sus dos componentes
//! están a la vez presentes y unidos al mismo ensamblaje: enlazados
//! directamente o colgando de un mismo compañero. El veto es una lista
//! negra consultada por la deduplicación, así la exclusión es monótona a
//! través de los barridos.

use crate::errors::CoreEngineError;
use crate::event::{EventJournal, GenerationEventKind};
use crate::network::Network;
use crate::state::State;
use biki_domain::Rule;
use uuid::Uuid;

pub(crate) fn apply(net: &mut Network,
                    rule: &Rule,
                    journal: &mut EventJournal)
                    -> Result<(), CoreEngineError> {
    let [first] = rule.subject.as_slice() else {
        return Err(CoreEngineError::InvalidRule(format!("la regla '{rule}' no tiene un único sujeto")));
    };
    let [second] = rule.object.as_slice() else {
        return Err(CoreEngineError::InvalidRule(format!("la regla '{rule}' no tiene un único objeto")));
    };

    let condemned: Vec<Uuid> =
        net.states()
           .filter(|state| {
               let firsts = state.slot_positions(first);
               let seconds = state.slot_positions(second);
               firsts.iter().any(|&a| {
                                seconds.iter().any(|&b| a != b && bound_together(state, a, b))
                            })
           })
           .map(State::id)
           .collect();

    for id in condemned {
        net.blacklist_state(id);
        journal.append(GenerationEventKind::StateBlacklisted { state_id: id,
                                                               rule_id: rule.id() });
    }
    Ok(())
}

/// ¿Comparten `a` y `b` un sitio de unión? Directamente enlazados, o ambos
/// enlazados a un mismo tercer componente.
fn bound_together(state: &State, a: usize, b: usize) -> bool {
    if state.adjacent(a, b) {
        return true;
    }
    (0..state.component_count()).any(|k| k != a && k != b && state.adjacent(a, k) && state.adjacent(b, k))
}
