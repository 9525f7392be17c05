//! Fase de disociación: parte un complejo en dos fragmentos rompiendo
//! exactamente un enlace compatible con el patrón de la regla.

use crate::combinatorics::{distinct_product, proper_nonempty_subsets};
use crate::errors::CoreEngineError;
use crate::network::Network;
use crate::state::{Link, State};
use crate::transition::{StateTransition, TransitionKind};
use biki_domain::{ReactionClass, Reversibility, Rule, RuleSlot};
use uuid::Uuid;

pub(crate) fn apply(net: &mut Network, rule: &Rule, snapshot: &[State]) -> Result<(), CoreEngineError> {
    let resolution = rule.signature_resolution();
    let reversibility = rule.kind.reversibility();

    for resolved in rule.conformation_combinations() {
        let acceptance =
            resolved.signature(ReactionClass::Dissociation, resolution)
                    .map_err(|e| CoreEngineError::InvalidRule(e.to_string()))?;
        let difference = difference_slots(&resolved.object, &resolved.subject);

        for candidate in snapshot {
            if candidate.component_count() < 2 || !candidate.matches_minimal(&resolved.object) {
                continue;
            }

            for part in proper_nonempty_subsets(candidate.component_count()) {
                let rest: Vec<usize> = (0..candidate.component_count())
                    .filter(|i| !part.contains(i))
                    .collect();

                let part_counts = candidate.count_for_indices(&part, resolution);
                let rest_counts = candidate.count_for_indices(&rest, resolution);
                if !part_counts.contains(&acceptance.subject)
                   || !rest_counts.contains(&acceptance.third_state)
                {
                    continue;
                }

                // el corte debe romper exactamente un enlace, con cada
                // extremo íntegro en un lado
                let crossing: Vec<&Link> =
                    candidate.links()
                             .iter()
                             .filter(|l| {
                                 let leaves = l.leaf_indices();
                                 leaves.iter().any(|i| part.contains(i))
                                 && leaves.iter().any(|i| rest.contains(i))
                             })
                             .collect();
                let [broken] = crossing.as_slice() else {
                    continue;
                };
                let (first, second) = broken.endpoints();
                let first_leaves = first.leaf_indices();
                let second_leaves = second.leaf_indices();
                let whole_sides = (first_leaves.iter().all(|i| part.contains(i))
                                   && second_leaves.iter().all(|i| rest.contains(i)))
                                  || (first_leaves.iter().all(|i| rest.contains(i))
                                      && second_leaves.iter().all(|i| part.contains(i)));
                if !whole_sides {
                    continue;
                }

                // los extremos del enlace roto deben realizar los patrones
                // sujeto y objeto-menos-sujeto, en cualquier orientación
                let pattern_holds =
                    (indices_satisfy_slots(candidate, &first_leaves, &resolved.subject)
                     && indices_satisfy_slots(candidate, &second_leaves, &difference))
                    || (indices_satisfy_slots(candidate, &second_leaves, &resolved.subject)
                        && indices_satisfy_slots(candidate, &first_leaves, &difference));
                if !pattern_holds {
                    continue;
                }

                let part_fragment = candidate.restricted_to(&part);
                let rest_fragment = candidate.restricted_to(&rest);
                let Some(part_id) = net.add_state_dedup(part_fragment) else {
                    continue;
                };
                let Some(rest_id) = net.add_state_dedup(rest_fragment) else {
                    continue;
                };
                add_pair(net, candidate.id(), part_id, reversibility);
                add_pair(net, candidate.id(), rest_id, reversibility);
            }
        }
    }
    Ok(())
}

fn add_pair(net: &mut Network, complex: Uuid, fragment: Uuid, reversibility: Reversibility) {
    net.add_edge_dedup(complex,
                       fragment,
                       StateTransition::new(TransitionKind::Dissociation, reversibility));
    if reversibility != Reversibility::Irreversible {
        net.add_edge_dedup(fragment,
                           complex,
                           StateTransition::new(TransitionKind::Dissociation, reversibility));
    }
}

/// Slots del objeto que no pertenecen al sujeto, emparejando por identidad
/// de componente (una ocurrencia consumida por slot de sujeto).
fn difference_slots(object: &[RuleSlot], subject: &[RuleSlot]) -> Vec<RuleSlot> {
    let mut remaining: Vec<RuleSlot> = object.to_vec();
    for slot in subject {
        if let Some(pos) = remaining.iter().position(|r| r.component.id() == slot.component.id()) {
            remaining.remove(pos);
        }
    }
    remaining
}

/// ¿Realizan exactamente los componentes de `indices` los `slots` dados?
/// Coincidencia perfecta: mismo número y una asignación inyectiva completa.
fn indices_satisfy_slots(state: &State, indices: &[usize], slots: &[RuleSlot]) -> bool {
    if indices.len() != slots.len() {
        return false;
    }
    let choices: Vec<Vec<usize>> =
        slots.iter()
             .map(|slot| {
                 indices.iter().copied().filter(|&i| state.component(i).matches_slot(slot)).collect()
             })
             .collect();
    !distinct_product(&choices).is_empty()
}
