//! Modelos: catálogo, lista de reglas y la red generada de cada variante.
//!
//! Un modelo es la unidad de trabajo del colaborador de edición: número y
//! nombre propios, un posible modelo padre del que se deriva, y su red
//! generada junto al diario de eventos de la última generación.

use crate::engine::{self, GenerationOptions};
use crate::errors::CoreEngineError;
use crate::event::{EventJournal, GenerationEvent};
use crate::network::Network;
use biki_domain::{DomainError, Drug, Protein, Rule};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    id: Uuid,
    pub number: i32,
    pub name: String,
    pub parent_model: Option<Uuid>,
    pub drug_list: Vec<Drug>,
    pub protein_list: Vec<Protein>,
    pub rule_list: Vec<Rule>,
    network: Option<Network>,
    #[serde(skip)]
    journal: EventJournal,
}

impl Model {
    pub fn new(number: i32, name: impl Into<String>, parent_model: Option<Uuid>) -> Self {
        Model { id: Uuid::new_v4(),
                number,
                name: name.into(),
                parent_model,
                drug_list: Vec::new(),
                protein_list: Vec::new(),
                rule_list: Vec::new(),
                network: None,
                journal: EventJournal::new() }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn network(&self) -> Option<&Network> {
        self.network.as_ref()
    }

    pub fn events(&self) -> &[GenerationEvent] {
        self.journal.list()
    }

    /// Revalida catálogo y reglas. Obligatorio antes de generar: una regla
    /// puede haber quedado huérfana si el catálogo menguó tras su creación.
    pub fn validate(&self) -> Result<(), CoreEngineError> {
        for drug in &self.drug_list {
            drug.check_traits().map_err(invalid_catalog)?;
        }
        for protein in &self.protein_list {
            protein.check_traits().map_err(invalid_catalog)?;
        }
        for rule in &self.rule_list {
            rule.check_traits().map_err(invalid_rule)?;
            rule.check_against_catalog(&self.drug_list, &self.protein_list).map_err(invalid_rule)?;
        }
        Ok(())
    }

    /// Genera (o regenera) la red del modelo y la anota. La red anterior y
    /// el diario anterior se descartan.
    pub fn generate_network(&mut self, options: GenerationOptions) -> Result<&Network, CoreEngineError> {
        self.validate()?;
        let mut journal = EventJournal::new();
        let mut net = engine::generate(&self.drug_list,
                                       &self.protein_list,
                                       &self.rule_list,
                                       options,
                                       &mut journal)?;
        engine::annotate(&mut net);
        self.journal = journal;
        self.network = Some(net);
        self.network
            .as_ref()
            .ok_or_else(|| CoreEngineError::Internal("red recién generada ausente".to_string()))
    }
}

fn invalid_catalog(e: DomainError) -> CoreEngineError {
    CoreEngineError::InvalidCatalog(e.to_string())
}

fn invalid_rule(e: DomainError) -> CoreEngineError {
    CoreEngineError::InvalidRule(e.to_string())
}

/// Primer número de modelo positivo libre en una colección. Reutiliza los
/// huecos que dejan los modelos borrados.
pub fn find_next_model_number(models: &[Model]) -> i32 {
    let mut candidate = 1;
    while models.iter().any(|m| m.number == candidate) {
        candidate += 1;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use biki_domain::{RuleKind, RuleSlot};

    #[test]
    fn next_number_fills_gaps() {
        let models: Vec<Model> = [1, 2, 4].iter().map(|&n| Model::new(n, "m", None)).collect();
        assert_eq!(find_next_model_number(&models), 3);

        let mut with_three = models.clone();
        with_three.push(Model::new(3, "m", None));
        assert_eq!(find_next_model_number(&with_three), 5);

        let without_first: Vec<Model> =
            with_three.into_iter().filter(|m| m.number != 1).collect();
        assert_eq!(find_next_model_number(&without_first), 1);
    }

    #[test]
    fn validation_rejects_orphaned_rules() {
        let a = Drug::new("a", "A").unwrap();
        let b = Drug::new("b", "B").unwrap();
        let rule = Rule::new(vec![RuleSlot::drug(&a)],
                             vec![RuleSlot::drug(&b)],
                             RuleKind::IsCompetitiveWith).unwrap();

        let mut model = Model::new(1, "orphan", None);
        model.drug_list.push(a);
        model.rule_list.push(rule);
        assert!(matches!(model.validate(), Err(CoreEngineError::InvalidRule(_))));
    }
}
