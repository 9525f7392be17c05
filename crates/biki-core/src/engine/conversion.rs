//! Fase de conversión: reescritura de conformaciones en el sitio, sin
//! cambiar composición ni topología de enlaces.

use crate::combinatorics::{combinations, permutations};
use crate::errors::CoreEngineError;
use crate::network::Network;
use crate::state::State;
use crate::transition::StateTransition;
use biki_domain::{ConformationSpec, Reversibility, Rule};

pub(crate) fn apply(net: &mut Network, rule: &Rule, snapshot: &[State]) -> Result<(), CoreEngineError> {
    let reversibility = rule.kind.reversibility();
    let slot_count = rule.subject.len();

    // el objeto de una conversión es siempre concreto y singleton por slot
    let targets: Vec<Vec<usize>> =
        rule.object
            .iter()
            .map(|slot| match &slot.conformation {
                ConformationSpec::Indices(v) => Ok(v.clone()),
                _ => Err(CoreEngineError::InvalidRule(format!(
                    "el objeto de la conversión '{rule}' no es concreto"
                ))),
            })
            .collect::<Result<_, _>>()?;

    for candidate in snapshot {
        if candidate.component_count() < slot_count {
            continue;
        }
        for combination in combinations(candidate.component_count(), slot_count) {
            for assignment in permutations(&combination) {
                let matched = assignment.iter().zip(rule.subject.iter()).all(|(&i, slot)| {
                                                                            candidate.component(i)
                                                                                     .matches_slot(slot)
                                                                        });
                if !matched {
                    continue;
                }
                // varias subunidades solo convierten juntas si están enlazadas
                if slot_count > 1 && !candidate.connected(&assignment) {
                    continue;
                }

                let rewrites: Vec<(usize, Vec<usize>)> =
                    assignment.iter().copied().zip(targets.iter().cloned()).collect();
                let product = candidate.rewrite_conformations(&rewrites);
                if product.content_key() == candidate.content_key() {
                    continue;
                }
                let Some(product_id) = net.add_state_dedup(product) else {
                    continue;
                };

                net.add_edge_dedup(candidate.id(),
                                   product_id,
                                   StateTransition::new_conversion(reversibility, true));
                if reversibility != Reversibility::Irreversible {
                    net.add_edge_dedup(product_id,
                                       candidate.id(),
                                       StateTransition::new_conversion(reversibility, false));
                }
            }
        }
    }
    Ok(())
}
