//! Fase de asociación: fusiona pares de estados candidatos añadiendo un
//! enlace nuevo entre los componentes anclados por la regla.

use crate::combinatorics::distinct_product;
use crate::errors::CoreEngineError;
use crate::network::Network;
use crate::state::{Link, LinkEndpoint, State};
use crate::transition::{StateTransition, TransitionKind};
use biki_domain::{CountingSignature, ReactionClass, Reversibility, Rule};
use uuid::Uuid;

pub(crate) fn apply(net: &mut Network, rule: &Rule, snapshot: &[State]) -> Result<(), CoreEngineError> {
    let resolution = rule.signature_resolution();
    let reversibility = rule.kind.reversibility();

    for resolved in rule.conformation_combinations() {
        let acceptance =
            resolved.signature(ReactionClass::Association, resolution)
                    .map_err(|e| CoreEngineError::InvalidRule(e.to_string()))?;

        let subjects: Vec<&State> =
            snapshot.iter().filter(|s| s.matches_minimal(&resolved.subject)).collect();
        let objects: Vec<&State> =
            snapshot.iter().filter(|s| s.matches_minimal(&resolved.object)).collect();

        for subject in &subjects {
            for object in &objects {
                let mut query = CountingSignature::new(resolution);
                query.subject = subject.signature_count(resolution);
                query.object = object.signature_count(resolution);
                query.third_state = query.subject.union(&query.object);
                if !query.subtractive_includes(&acceptance) {
                    continue;
                }

                // posiciones de anclaje de cada slot, sin repetir componente
                let subject_choices: Vec<Vec<usize>> =
                    resolved.subject.iter().map(|slot| subject.slot_positions(slot)).collect();
                let object_choices: Vec<Vec<usize>> =
                    resolved.object.iter().map(|slot| object.slot_positions(slot)).collect();

                for subject_anchor in distinct_product(&subject_choices) {
                    for object_anchor in distinct_product(&object_choices) {
                        bind(net,
                             subject,
                             object,
                             &subject_anchor,
                             &object_anchor,
                             reversibility);
                    }
                }
            }
        }
    }
    Ok(())
}

/// Intenta crear el estado producto de una unión concreta. Rechaza el enlace
/// si duplica uno existente entre los mismos componentes (mismo par de
/// firmas de identidad compartiendo algún índice), lo que corta la
/// acumulación de enlaces redundantes sobre un mismo sitio.
fn bind(net: &mut Network,
        subject: &State,
        object: &State,
        subject_anchor: &[usize],
        object_anchor: &[usize],
        reversibility: Reversibility) {
    let (mut merged, subject_map, object_map) = subject.merge(object);

    let mapped_subject: Vec<usize> = subject_anchor.iter().map(|&i| subject_map[i]).collect();
    let mapped_object: Vec<usize> = object_anchor.iter().map(|&i| object_map[i]).collect();
    let link = Link::new(LinkEndpoint::from_indices(&mapped_subject),
                         LinkEndpoint::from_indices(&mapped_object));

    if is_redundant_link(&merged, &link) {
        return;
    }
    merged.insert_link(link);

    let product = merged.canonicalized();
    let Some(product_id) = net.add_state_dedup(product) else {
        return;
    };

    add_pair(net, subject.id(), product_id, reversibility);
    add_pair(net, object.id(), product_id, reversibility);
}

fn add_pair(net: &mut Network, reactant: Uuid, product: Uuid, reversibility: Reversibility) {
    net.add_edge_dedup(reactant,
                       product,
                       StateTransition::new(TransitionKind::Association, reversibility));
    if reversibility != Reversibility::Irreversible {
        net.add_edge_dedup(product,
                           reactant,
                           StateTransition::new(TransitionKind::Association, reversibility));
    }
}

/// Firma de identidad de un extremo: los ids de componente de sus hojas,
/// ordenados. La redundancia se juzga por identidad, no por conformación:
/// un sitio ya ocupado entre estos mismos componentes no admite otro enlace
/// equivalente.
fn endpoint_identity(state: &State, endpoint: &LinkEndpoint) -> Vec<Uuid> {
    let mut ids: Vec<Uuid> =
        endpoint.leaf_indices().iter().map(|&i| state.component(i).id()).collect();
    ids.sort_unstable();
    ids
}

fn is_redundant_link(state: &State, candidate: &Link) -> bool {
    let (a, b) = candidate.endpoints();
    let mut candidate_pair = [endpoint_identity(state, a), endpoint_identity(state, b)];
    candidate_pair.sort();
    let candidate_leaves = candidate.leaf_indices();

    state.links().iter().any(|existing| {
                            let (x, y) = existing.endpoints();
                            let mut existing_pair =
                                [endpoint_identity(state, x), endpoint_identity(state, y)];
                            existing_pair.sort();
                            existing_pair == candidate_pair
                            && existing.leaf_indices()
                                       .iter()
                                       .any(|i| candidate_leaves.contains(i))
                        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use biki_domain::{Drug, Protein, RuleKind, RuleSlot};
    use std::collections::BTreeSet;

    fn receptor() -> Protein {
        Protein::new("receptor",
                     "R",
                     vec!["inactive".to_string(), "active".to_string()],
                     vec!["".to_string(), "*".to_string()]).unwrap()
    }

    #[test]
    fn binding_produces_a_two_component_complex() {
        let a = Drug::new("a", "A").unwrap();
        let r = receptor();
        let rule = Rule::new(vec![RuleSlot::drug(&a)],
                             vec![RuleSlot::protein_at(&r, vec![0])],
                             RuleKind::ReversiblyAssociatesWith).unwrap();

        let mut net = Network::new();
        net.add_state_dedup(State::from_drug(a));
        net.add_state_dedup(State::from_protein_conformation(r, 0));
        let snapshot: Vec<State> = net.states().cloned().collect();
        apply(&mut net, &rule, &snapshot).unwrap();

        assert_eq!(net.state_count(), 3);
        // dos pares bidireccionales: A↔AR y R↔AR
        assert_eq!(net.edge_count(), 4);
    }

    #[test]
    fn a_second_equivalent_bond_on_the_same_site_is_rejected() {
        let a = Drug::new("a", "A").unwrap();
        let r = receptor();

        let mut complex = State::assemble(vec![a.clone()],
                                          vec![crate::state::ConformedProtein { protein: r.clone(),
                                                                                conformation:
                                                                                    vec![0] }],
                                          BTreeSet::new());
        complex.insert_link(Link::new(LinkEndpoint::Leaf(0), LinkEndpoint::Leaf(1)));
        let complex = complex.canonicalized();

        let duplicate = Link::new(LinkEndpoint::Leaf(0), LinkEndpoint::Leaf(1));
        assert!(is_redundant_link(&complex, &duplicate));
    }

    #[test]
    fn wildcard_rule_binds_every_conformation() {
        let a = Drug::new("a", "A").unwrap();
        let r = receptor();
        let rule = Rule::new(vec![RuleSlot::drug(&a)],
                             vec![RuleSlot::protein_any(&r)],
                             RuleKind::AssociatesWith).unwrap();

        let mut net = Network::new();
        net.add_state_dedup(State::from_drug(a));
        net.add_state_dedup(State::from_protein_conformation(r.clone(), 0));
        net.add_state_dedup(State::from_protein_conformation(r, 1));
        let snapshot: Vec<State> = net.states().cloned().collect();
        apply(&mut net, &rule, &snapshot).unwrap();

        // A, R0, R1 más AR0 y AR1
        assert_eq!(net.state_count(), 5);
    }
}
