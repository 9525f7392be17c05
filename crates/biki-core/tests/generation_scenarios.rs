//! Escenarios de generación de extremo a extremo sobre catálogos pequeños.

use biki_core::{generate, EventJournal, GenerationEventKind, GenerationOptions, TransitionKind};
use biki_domain::{Drug, Protein, Rule, RuleKind, RuleSlot};

fn drug(name: &str, symbol: &str) -> Drug {
    Drug::new(name, symbol).unwrap()
}

fn receptor_two_conformations() -> Protein {
    Protein::new("receptor",
                 "R",
                 vec!["inactive".to_string(), "active".to_string()],
                 vec!["".to_string(), "*".to_string()]).unwrap()
}

fn receptor_single() -> Protein {
    Protein::new("receptor", "R", vec!["ground".to_string()], vec!["".to_string()]).unwrap()
}

/// Un agonista, un receptor de dos conformaciones, unión con comodín y
/// conversión entre conformaciones.
#[test]
fn agonist_and_two_state_receptor() {
    let a = drug("agonist", "A");
    let r = receptor_two_conformations();
    let binding = Rule::new(vec![RuleSlot::drug(&a)],
                            vec![RuleSlot::protein_any(&r)],
                            RuleKind::ReversiblyAssociatesWith).unwrap();
    let activation = Rule::new(vec![RuleSlot::protein_at(&r, vec![0])],
                               vec![RuleSlot::protein_at(&r, vec![1])],
                               RuleKind::ReversiblyConvertsTo).unwrap();

    let mut journal = EventJournal::new();
    let net = generate(&[a],
                       &[r],
                       &[binding, activation],
                       GenerationOptions::default(),
                       &mut journal).unwrap();

    // A, R, R*, AR, AR*
    assert_eq!(net.state_count(), 5);
    // seis pares bidireccionales: A↔AR, R↔AR, A↔AR*, R*↔AR*, R↔R*, AR↔AR*
    assert_eq!(net.edge_count(), 12);
    assert!(net.converged);
    assert!(journal.list()
                   .iter()
                   .any(|e| matches!(e.kind, GenerationEventKind::FixpointReached { .. })));
}

/// Dos ligandos competitivos por el mismo receptor: el complejo ternario se
/// veta y no resucita.
#[test]
fn competitive_ligands_exclude_the_ternary_complex() {
    let a = drug("agonist", "A");
    let b = drug("blocker", "B");
    let r = receptor_single();
    let rules = vec![Rule::new(vec![RuleSlot::drug(&a)],
                               vec![RuleSlot::protein_any(&r)],
                               RuleKind::ReversiblyAssociatesWith).unwrap(),
                     Rule::new(vec![RuleSlot::drug(&b)],
                               vec![RuleSlot::protein_any(&r)],
                               RuleKind::ReversiblyAssociatesWith).unwrap(),
                     Rule::new(vec![RuleSlot::drug(&a)],
                               vec![RuleSlot::drug(&b)],
                               RuleKind::IsCompetitiveWith).unwrap()];

    let mut journal = EventJournal::new();
    let net = generate(&[a, b],
                       &[r],
                       &rules,
                       GenerationOptions::default(),
                       &mut journal).unwrap();

    // A, B, R, AR, BR; ABR vetado
    assert_eq!(net.state_count(), 5);
    assert_eq!(net.blacklisted_states().len(), 1);
    assert_eq!(net.blacklisted_states()[0].component_count(), 3);
    assert!(net.converged);
    assert!(journal.list()
                   .iter()
                   .any(|e| matches!(e.kind, GenerationEventKind::StateBlacklisted { .. })));
}

/// Sin competición, el complejo ternario alcanzado por dos caminos distintos
/// es un único estado.
#[test]
fn ternary_complex_reached_by_two_paths_is_deduplicated() {
    let a = drug("agonist", "A");
    let b = drug("blocker", "B");
    let r = receptor_single();
    let rules = vec![Rule::new(vec![RuleSlot::drug(&a)],
                               vec![RuleSlot::protein_any(&r)],
                               RuleKind::ReversiblyAssociatesWith).unwrap(),
                     Rule::new(vec![RuleSlot::drug(&b)],
                               vec![RuleSlot::protein_any(&r)],
                               RuleKind::ReversiblyAssociatesWith).unwrap()];

    let mut journal = EventJournal::new();
    let net = generate(&[a, b],
                       &[r],
                       &rules,
                       GenerationOptions::default(),
                       &mut journal).unwrap();

    // A, B, R, AR, BR, ABR
    assert_eq!(net.state_count(), 6);
    let ternary: Vec<_> = net.states().filter(|s| s.component_count() == 3).collect();
    assert_eq!(ternary.len(), 1);
    // dos caminos de entrada y sus vueltas: A/B/AR/BR ↔ ABR
    let ternary_id = ternary[0].id();
    let incoming = net.edges().iter().filter(|e| e.target == ternary_id).count();
    assert_eq!(incoming, 4);
}

/// El mismo sitio no admite un segundo enlace equivalente: ni dos ligandos
/// idénticos sobre un receptor, ni un ligando sobre dos receptores.
#[test]
fn equivalent_second_bonds_are_rejected() {
    let a = drug("agonist", "A");
    let r = receptor_single();
    let rule = Rule::new(vec![RuleSlot::drug(&a)],
                         vec![RuleSlot::protein_any(&r)],
                         RuleKind::ReversiblyAssociatesWith).unwrap();

    let mut journal = EventJournal::new();
    let net = generate(&[a],
                       &[r],
                       &[rule],
                       GenerationOptions::default(),
                       &mut journal).unwrap();

    // solo A, R y AR: nada de AAR ni ARR
    assert_eq!(net.state_count(), 3);
    assert!(net.states().all(|s| s.component_count() <= 2));
}

/// La homodimerización para en el dímero: el enlace del trímero duplicaría
/// un sitio ya ocupado.
#[test]
fn homodimerization_stops_at_the_dimer() {
    let r = receptor_single();
    let rule = Rule::new(vec![RuleSlot::protein_any(&r)],
                         vec![RuleSlot::protein_any(&r)],
                         RuleKind::ReversiblyAssociatesWith).unwrap();

    let mut journal = EventJournal::new();
    let net = generate(&[],
                       &[r],
                       &[rule],
                       GenerationOptions::default(),
                       &mut journal).unwrap();

    assert_eq!(net.state_count(), 2);
    assert!(net.converged);
}

/// La disociación parte el complejo en sus dos fragmentos.
#[test]
fn dissociation_yields_both_fragments() {
    let a = drug("agonist", "A");
    let r = receptor_single();
    let rules = vec![Rule::new(vec![RuleSlot::drug(&a)],
                               vec![RuleSlot::protein_any(&r)],
                               RuleKind::AssociatesWith).unwrap(),
                     Rule::new(vec![RuleSlot::drug(&a)],
                               vec![RuleSlot::drug(&a), RuleSlot::protein_any(&r)],
                               RuleKind::DissociatesFrom).unwrap()];

    let mut journal = EventJournal::new();
    let net = generate(&[a],
                       &[r],
                       &rules,
                       GenerationOptions::default(),
                       &mut journal).unwrap();

    assert_eq!(net.state_count(), 3);
    let dissociations: Vec<_> =
        net.edges().iter().filter(|e| e.transition.kind == TransitionKind::Dissociation).collect();
    assert_eq!(dissociations.len(), 2);
    // ambas salen del complejo
    let complex = net.states().find(|s| s.component_count() == 2).unwrap();
    assert!(dissociations.iter().all(|e| e.source == complex.id()));
}

/// Dos generaciones del mismo modelo producen redes estructuralmente
/// iguales, con ids distintos.
#[test]
fn regeneration_is_structurally_idempotent() {
    let a = drug("agonist", "A");
    let r = receptor_two_conformations();
    let rules = vec![Rule::new(vec![RuleSlot::drug(&a)],
                               vec![RuleSlot::protein_any(&r)],
                               RuleKind::ReversiblyAssociatesWith).unwrap(),
                     Rule::new(vec![RuleSlot::protein_at(&r, vec![0])],
                               vec![RuleSlot::protein_at(&r, vec![1])],
                               RuleKind::ReversiblyConvertsTo).unwrap()];

    let mut first_journal = EventJournal::new();
    let first = generate(&[a.clone()],
                         &[r.clone()],
                         &rules,
                         GenerationOptions::default(),
                         &mut first_journal).unwrap();
    let mut second_journal = EventJournal::new();
    let second = generate(&[a],
                          &[r],
                          &rules,
                          GenerationOptions::default(),
                          &mut second_journal).unwrap();

    assert!(first.structurally_equal(&second));
}

/// Un techo de barridos insuficiente devuelve la red incompleta con el
/// diagnóstico en el diario, sin error duro.
#[test]
fn exhausted_sweep_ceiling_is_a_soft_failure() {
    let a = drug("agonist", "A");
    let r = receptor_two_conformations();
    let rules = vec![Rule::new(vec![RuleSlot::drug(&a)],
                               vec![RuleSlot::protein_any(&r)],
                               RuleKind::ReversiblyAssociatesWith).unwrap(),
                     Rule::new(vec![RuleSlot::protein_at(&r, vec![0])],
                               vec![RuleSlot::protein_at(&r, vec![1])],
                               RuleKind::ReversiblyConvertsTo).unwrap()];

    let mut journal = EventJournal::new();
    let net = generate(&[a],
                       &[r],
                       &rules,
                       GenerationOptions { sweep_limit: 1 },
                       &mut journal).unwrap();

    assert!(!net.converged);
    assert_eq!(net.sweeps, 1);
    assert!(journal.list()
                   .iter()
                   .any(|e| matches!(e.kind, GenerationEventKind::SweepCeilingReached { limit: 1 })));
}
