//! Anotación de la red generada: símbolos y nombres legibles, numeración
//! estable y variables para los estados y las transiciones.
//!
//! La numeración de estados sigue el tamaño del complejo (componentes
//! sueltos primero) con desempate por clave de contenido, así dos
//! generaciones del mismo modelo numeran igual. Cada transición comparte
//! magnitud con su inversa estructural; el signo es positivo en el sentido
//! de unión (hacia el complejo mayor) y, en conversiones, en el sentido de
//! referencia de la regla.

use crate::network::Network;
use crate::state::{ComponentRef, State};
use crate::transition::TransitionKind;
use std::collections::HashMap;
use uuid::Uuid;

pub fn annotate(net: &mut Network) {
    autosymbol(net);
    autonumber(net);
    autovariable(net);
}

/// Orden de presentación de los componentes de un estado: clave estable
/// (símbolo, conformación) con los componentes enlazados contiguos y los
/// enlaces proteína-proteína por delante de los fármaco-proteína.
fn symbol_order(state: &State) -> Vec<usize> {
    let n = state.component_count();
    let key = |i: usize| {
        let component = state.component(i);
        (component.symbol().to_string(),
         component.conformation().map_or(0, <[usize]>::len),
         component.conformation().map_or_else(Vec::new, <[usize]>::to_vec))
    };
    let mut remaining: Vec<usize> = (0..n).collect();
    remaining.sort_by_key(|&i| key(i));

    let start = remaining.iter()
                         .position(|&i| {
                             state.component(i).is_protein()
                             && (0..n).any(|j| {
                                          j != i
                                          && state.component(j).is_protein()
                                          && state.adjacent(i, j)
                                      })
                         })
                         .unwrap_or(0);
    let mut placed = vec![remaining.remove(start)];

    while !remaining.is_empty() {
        let bonded_protein = remaining.iter().position(|&i| {
                                                 state.component(i).is_protein()
                                                 && placed.iter().any(|&p| state.adjacent(p, i))
                                             });
        let bonded = remaining.iter().position(|&i| placed.iter().any(|&p| state.adjacent(p, i)));
        let next = bonded_protein.or(bonded).unwrap_or(0);
        placed.push(remaining.remove(next));
    }
    placed
}

fn autosymbol(net: &mut Network) {
    for state in net.states_mut() {
        let order = symbol_order(state);
        let mut symbol = String::new();
        let mut names: Vec<String> = Vec::new();
        for index in order {
            let component = state.component(index);
            match component {
                ComponentRef::Drug(drug) => {
                    symbol.push_str(&drug.symbol);
                    names.push(drug.name.clone());
                }
                ComponentRef::Protein(protein, conformation) => {
                    symbol.push_str(&protein.symbol);
                    let mut conf_names: Vec<&str> = Vec::new();
                    for &i in conformation {
                        symbol.push_str(&protein.conformation_symbols[i]);
                        conf_names.push(&protein.conformation_names[i]);
                    }
                    names.push(format!("{} ({})", protein.name, conf_names.join(", ")));
                }
            }
        }
        state.set_symbol(symbol);
        state.set_name(names.join(" · "));
    }
}

/// Orden estable de numeración: tamaño del complejo y clave de contenido.
fn numbering_order(net: &Network) -> Vec<Uuid> {
    let mut order: Vec<(usize, String, Uuid)> =
        net.states().map(|s| (s.component_count(), s.content_key(), s.id())).collect();
    order.sort_by(|a, b| (a.0, &a.1).cmp(&(b.0, &b.1)));
    order.into_iter().map(|(_, _, id)| id).collect()
}

fn autonumber(net: &mut Network) {
    let order = numbering_order(net);
    let counts: HashMap<Uuid, usize> =
        net.states().map(|s| (s.id(), s.component_count())).collect();

    let position: HashMap<Uuid, usize> = order.iter().enumerate().map(|(i, &id)| (id, i)).collect();
    for state in net.states_mut() {
        state.set_number(position[&state.id()] as u32 + 1);
    }

    let sign = |kind: TransitionKind, source: Uuid, target: Uuid, forward: Option<bool>| -> i64 {
        match kind {
            TransitionKind::Conversion => {
                if forward == Some(true) {
                    1
                } else {
                    -1
                }
            }
            _ => {
                if counts[&target] > counts[&source] {
                    1
                } else {
                    -1
                }
            }
        }
    };

    let mut magnitude: i64 = 0;
    for &state_id in &order {
        let edges = net.edges_mut();
        for i in 0..edges.len() {
            if edges[i].source != state_id || edges[i].transition.number.is_some() {
                continue;
            }
            magnitude += 1;
            let (source, target, kind, forward) = (edges[i].source,
                                                   edges[i].target,
                                                   edges[i].transition.kind,
                                                   edges[i].transition.reference_forward);
            edges[i].transition.number = Some(sign(kind, source, target, forward) * magnitude);

            // la inversa estructural comparte magnitud
            if let Some(reverse) = edges.iter_mut().find(|e| {
                                                        e.source == target
                                                        && e.target == source
                                                        && e.transition.kind == kind
                                                        && e.transition.number.is_none()
                                                    })
            {
                let r_forward = reverse.transition.reference_forward;
                reverse.transition.number = Some(sign(kind, target, source, r_forward) * magnitude);
            }
        }
    }
}

fn autovariable(net: &mut Network) {
    for state in net.states_mut() {
        if let Some(number) = state.number() {
            state.set_variable(format!("x_{number}"));
        }
    }
    for edge in net.edges_mut() {
        if let Some(number) = edge.transition.number {
            edge.transition.variable = Some(format!("k_{number}"));
        }
    }
}
