//! Bucle de barridos del motor.
//!
//! Cada barrido aplica primero la fase estructural (asociación, disociación,
//! conversión) sobre una instantánea de los estados vivos al inicio del
//! barrido, y después la fase de competición, que solo puede vetar. El
//! fingerprint estructural decide la parada: si un barrido completo no
//! cambia la red, hay punto fijo. Si se agota el techo de barridos, la red
//! se devuelve marcada como no convergida con el diagnóstico en el diario.

use crate::constants::DEFAULT_SWEEP_LIMIT;
use crate::engine::{association, competition, conversion, dissociation};
use crate::errors::CoreEngineError;
use crate::event::{EventJournal, GenerationEventKind};
use crate::network::Network;
use crate::state::State;
use biki_domain::{Drug, Protein, ReactionClass, Rule};
use chrono::Utc;

#[derive(Debug, Clone, Copy)]
pub struct GenerationOptions {
    pub sweep_limit: usize,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        GenerationOptions { sweep_limit: DEFAULT_SWEEP_LIMIT }
    }
}

/// Genera la red de reacciones de un catálogo y una lista de reglas.
///
/// Siembra un estado por fármaco y uno por cada conformación de cada
/// proteína, y barre las reglas hasta estabilización estructural o hasta el
/// techo de barridos.
pub fn generate(drugs: &[Drug],
                proteins: &[Protein],
                rules: &[Rule],
                options: GenerationOptions,
                journal: &mut EventJournal)
                -> Result<Network, CoreEngineError> {
    journal.append(GenerationEventKind::GenerationStarted { drug_count: drugs.len(),
                                                            protein_count: proteins.len(),
                                                            rule_count: rules.len() });

    let mut net = Network::new();
    for drug in drugs {
        net.add_state_dedup(State::from_drug(drug.clone()));
    }
    for protein in proteins {
        for index in 0..protein.conformation_count() {
            net.add_state_dedup(State::from_protein_conformation(protein.clone(), index));
        }
    }

    let mut previous = net.fingerprint();
    let mut converged = false;
    let mut sweeps = 0;

    for sweep in 1..=options.sweep_limit.max(1) {
        sweeps = sweep;

        // instantánea: los estados creados en este barrido entran al siguiente
        let snapshot: Vec<State> = net.states().cloned().collect();
        for rule in rules {
            if rule.kind.is_structurally_inert() {
                continue;
            }
            match rule.kind.reaction_class() {
                ReactionClass::Association => association::apply(&mut net, rule, &snapshot)?,
                ReactionClass::Dissociation => dissociation::apply(&mut net, rule, &snapshot)?,
                ReactionClass::Conversion => conversion::apply(&mut net, rule, &snapshot)?,
                ReactionClass::Competition => {}
            }
        }
        for rule in rules {
            if rule.kind.reaction_class() == ReactionClass::Competition
               && !rule.kind.is_structurally_inert()
            {
                competition::apply(&mut net, rule, journal)?;
            }
        }

        let fingerprint = net.fingerprint();
        journal.append(GenerationEventKind::SweepCompleted { sweep,
                                                             state_count: net.state_count(),
                                                             edge_count: net.edge_count(),
                                                             fingerprint: fingerprint.clone() });
        if fingerprint == previous {
            converged = true;
            journal.append(GenerationEventKind::FixpointReached { sweeps: sweep });
            break;
        }
        previous = fingerprint;
    }

    if !converged {
        journal.append(GenerationEventKind::SweepCeilingReached { limit: options.sweep_limit });
    }

    net.converged = converged;
    net.sweeps = sweeps;
    net.generated_at = Some(Utc::now());
    journal.append(GenerationEventKind::GenerationCompleted { state_count: net.state_count(),
                                                              edge_count: net.edge_count(),
                                                              converged });
    Ok(net)
}
