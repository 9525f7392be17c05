//! Ciclo de vida de modelos: numeración, derivación y generación integrada.

use biki_core::{find_next_model_number, GenerationEventKind, GenerationOptions, Model};
use biki_domain::{Drug, Protein, Rule, RuleKind, RuleSlot};

fn transporter() -> Protein {
    Protein::new("dopamine transporter",
                 "DAT",
                 vec!["outward open".to_string(),
                      "outward closed".to_string(),
                      "inward closed".to_string(),
                      "inward open".to_string()],
                 vec!["oo".to_string(), "oc".to_string(), "ic".to_string(), "io".to_string()])
        .unwrap()
}

fn transporter_model() -> Model {
    let amphetamine = Drug::new("amphetamine", "Am").unwrap();
    let dat = transporter();

    let mut model = Model::new(1, "amphetamine uptake", None);
    model.rule_list.push(Rule::new(vec![RuleSlot::drug(&amphetamine)],
                                   vec![RuleSlot::protein_at(&dat, vec![0, 3])],
                                   RuleKind::ReversiblyAssociatesWith).unwrap());
    model.rule_list.push(Rule::new(vec![RuleSlot::protein_at(&dat, vec![0])],
                                   vec![RuleSlot::protein_at(&dat, vec![3])],
                                   RuleKind::ReversiblyConvertsTo).unwrap());
    model.drug_list.push(amphetamine);
    model.protein_list.push(dat);
    model
}

#[test]
fn generation_populates_network_and_journal() {
    let mut model = transporter_model();
    let net = model.generate_network(GenerationOptions::default()).unwrap();

    // Am, DAT en 4 conformaciones, Am·DAT en las dos conformaciones listadas
    assert_eq!(net.state_count(), 7);
    assert!(net.converged);
    assert!(model.events()
                 .iter()
                 .any(|e| matches!(e.kind, GenerationEventKind::GenerationCompleted { .. })));
}

#[test]
fn regeneration_replaces_the_previous_network() {
    let mut model = transporter_model();
    model.generate_network(GenerationOptions::default()).unwrap();
    let first_states = model.network().unwrap().state_count();
    model.generate_network(GenerationOptions::default()).unwrap();
    assert_eq!(model.network().unwrap().state_count(), first_states);
}

#[test]
fn derived_models_remember_their_parent() {
    let base = Model::new(1, "base", None);
    let derived = Model::new(2, "variant", Some(base.id()));
    assert_eq!(derived.parent_model, Some(base.id()));
}

#[test]
fn model_numbers_reuse_gaps() {
    let models = vec![Model::new(1, "a", None), Model::new(3, "c", None)];
    assert_eq!(find_next_model_number(&models), 2);
    assert_eq!(find_next_model_number(&[]), 1);
}

#[test]
fn validation_failure_blocks_generation() {
    let mut model = transporter_model();
    model.protein_list.clear();
    assert!(model.generate_network(GenerationOptions::default()).is_err());
    assert!(model.network().is_none());
}
