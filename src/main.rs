//! Demostración: un modelo de captación con transportador, generado y
//! anotado, con el diario de eventos al final.

use bikinet_rust::{find_next_model_number, GenerationOptions, Model};
use biki_domain::{Drug, DomainError, Protein, Rule, RuleKind, RuleSlot};

fn build_model() -> Result<Model, DomainError> {
    let amphetamine = Drug::new("amphetamine", "Am")?;
    let transporter = Protein::new(
        "dopamine transporter",
        "DAT",
        vec!["outward open".to_string(),
             "outward closed".to_string(),
             "inward closed".to_string(),
             "inward open".to_string()],
        vec!["oo".to_string(), "oc".to_string(), "ic".to_string(), "io".to_string()],
    )?;

    let mut model = Model::new(find_next_model_number(&[]), "amphetamine uptake", None);
    // Am se une al transportador solo en las conformaciones abiertas
    model.rule_list.push(Rule::new(vec![RuleSlot::drug(&amphetamine)],
                                   vec![RuleSlot::protein_at(&transporter, vec![0, 3])],
                                   RuleKind::ReversiblyAssociatesWith)?);
    // ciclo conformacional del transportador
    model.rule_list.push(Rule::new(vec![RuleSlot::protein_at(&transporter, vec![0])],
                                   vec![RuleSlot::protein_at(&transporter, vec![1])],
                                   RuleKind::ReversiblyConvertsTo)?);
    model.rule_list.push(Rule::new(vec![RuleSlot::protein_at(&transporter, vec![1])],
                                   vec![RuleSlot::protein_at(&transporter, vec![2])],
                                   RuleKind::ReversiblyConvertsTo)?);
    model.rule_list.push(Rule::new(vec![RuleSlot::protein_at(&transporter, vec![2])],
                                   vec![RuleSlot::protein_at(&transporter, vec![3])],
                                   RuleKind::ReversiblyConvertsTo)?);
    model.drug_list.push(amphetamine);
    model.protein_list.push(transporter);
    Ok(model)
}

fn main() {
    let mut model = match build_model() {
        Ok(model) => model,
        Err(e) => {
            eprintln!("modelo inválido: {e}");
            std::process::exit(1);
        }
    };

    println!("== modelo {} «{}» ==", model.number, model.name);
    for rule in &model.rule_list {
        println!("  regla: {rule}");
    }

    let net = match model.generate_network(GenerationOptions::default()) {
        Ok(net) => net.clone(),
        Err(e) => {
            eprintln!("generación fallida: {e}");
            std::process::exit(1);
        }
    };

    println!("\nred: {} estados, {} transiciones, convergida={} en {} barridos",
             net.state_count(),
             net.edge_count(),
             net.converged,
             net.sweeps);

    let mut states: Vec<_> = net.states().collect();
    states.sort_by_key(|s| s.number());
    println!("\nestados:");
    for state in states {
        println!("  {:>4}  {:8}  {}",
                 state.variable().unwrap_or("-"),
                 state.symbol().unwrap_or("-"),
                 state.name().unwrap_or("-"));
    }

    println!("\ntransiciones:");
    for edge in net.edges() {
        let source = net.state(edge.source).and_then(|s| s.symbol()).unwrap_or("?");
        let target = net.state(edge.target).and_then(|s| s.symbol()).unwrap_or("?");
        println!("  {:>5}  {} -> {}  ({:?})",
                 edge.transition.variable.as_deref().unwrap_or("-"),
                 source,
                 target,
                 edge.transition.kind);
    }

    println!("\ndiario:");
    for event in model.events() {
        println!("  [{}] {:?}", event.seq, event.kind);
    }
}
