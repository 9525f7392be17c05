//! Reglas de interacción: patrones de una clase de reacción sobre los
//! componentes del catálogo, más la generación de sus firmas de aceptación.

use crate::{Component, ComponentCount, ConformationSpec, CountingSignature, DomainError, Drug,
            Protein, SignatureKey, SignatureResolution};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Vocabulario fijo de once clases de reacción.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleKind {
    AssociatesWith,
    ReversiblyAssociatesWith,
    AssociatesInRapidEquilibriumWith,
    DissociatesFrom,
    ReversiblyDissociatesFrom,
    DissociatesInRapidEquilibriumFrom,
    ConvertsTo,
    ReversiblyConvertsTo,
    ConvertsInRapidEquilibriumTo,
    IsCompetitiveWith,
    IsNoncompetitiveWith,
}

/// Clase estructural de una regla, usada por el motor para despachar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReactionClass {
    Association,
    Dissociation,
    Conversion,
    Competition,
}

/// Variante de reversibilidad de una regla o transición.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reversibility {
    Irreversible,
    Reversible,
    RapidEquilibrium,
}

impl RuleKind {
    pub const ALL: [RuleKind; 11] = [RuleKind::AssociatesWith,
                                     RuleKind::ReversiblyAssociatesWith,
                                     RuleKind::AssociatesInRapidEquilibriumWith,
                                     RuleKind::DissociatesFrom,
                                     RuleKind::ReversiblyDissociatesFrom,
                                     RuleKind::DissociatesInRapidEquilibriumFrom,
                                     RuleKind::ConvertsTo,
                                     RuleKind::ReversiblyConvertsTo,
                                     RuleKind::ConvertsInRapidEquilibriumTo,
                                     RuleKind::IsCompetitiveWith,
                                     RuleKind::IsNoncompetitiveWith];

    /// Frase con la que el colaborador de edición muestra la regla.
    pub fn phrase(&self) -> &'static str {
        match self {
            RuleKind::AssociatesWith => " associates with ",
            RuleKind::ReversiblyAssociatesWith => " reversibly associates with ",
            RuleKind::AssociatesInRapidEquilibriumWith => {
                " associates and dissociates in rapid equilibrium with "
            }
            RuleKind::DissociatesFrom => " dissociates from ",
            RuleKind::ReversiblyDissociatesFrom => " reversibly dissociates from ",
            RuleKind::DissociatesInRapidEquilibriumFrom => {
                " dissociates and reassociates in rapid equilibrium from "
            }
            RuleKind::ConvertsTo => " converts to ",
            RuleKind::ReversiblyConvertsTo => " reversibly converts to ",
            RuleKind::ConvertsInRapidEquilibriumTo => " converts to and from in rapid equilibrium ",
            RuleKind::IsCompetitiveWith => " is competitive with ",
            RuleKind::IsNoncompetitiveWith => " is noncompetitive with ",
        }
    }

    pub fn reaction_class(&self) -> ReactionClass {
        match self {
            RuleKind::AssociatesWith
            | RuleKind::ReversiblyAssociatesWith
            | RuleKind::AssociatesInRapidEquilibriumWith => ReactionClass::Association,
            RuleKind::DissociatesFrom
            | RuleKind::ReversiblyDissociatesFrom
            | RuleKind::DissociatesInRapidEquilibriumFrom => ReactionClass::Dissociation,
            RuleKind::ConvertsTo
            | RuleKind::ReversiblyConvertsTo
            | RuleKind::ConvertsInRapidEquilibriumTo => ReactionClass::Conversion,
            RuleKind::IsCompetitiveWith | RuleKind::IsNoncompetitiveWith => ReactionClass::Competition,
        }
    }

    pub fn reversibility(&self) -> Reversibility {
        match self {
            RuleKind::ReversiblyAssociatesWith
            | RuleKind::ReversiblyDissociatesFrom
            | RuleKind::ReversiblyConvertsTo => Reversibility::Reversible,
            RuleKind::AssociatesInRapidEquilibriumWith
            | RuleKind::DissociatesInRapidEquilibriumFrom
            | RuleKind::ConvertsInRapidEquilibriumTo => Reversibility::RapidEquilibrium,
            _ => Reversibility::Irreversible,
        }
    }

    /// Las reglas de exclusión mutua no crean estructura; `IsNoncompetitiveWith`
    /// declara permitida la co-unión, que el generador ya asume por defecto,
    /// así que es estructuralmente inerte.
    pub fn is_structurally_inert(&self) -> bool {
        matches!(self, RuleKind::IsNoncompetitiveWith)
    }
}

/// Un slot de regla: un componente del catálogo más su especificación de
/// conformación.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSlot {
    pub component: Component,
    pub conformation: ConformationSpec,
}

impl RuleSlot {
    pub fn drug(drug: &Drug) -> Self {
        RuleSlot { component: Component::Drug(drug.clone()),
                   conformation: ConformationSpec::None }
    }

    pub fn protein(protein: &Protein, conformation: ConformationSpec) -> Self {
        RuleSlot { component: Component::Protein(protein.clone()),
                   conformation }
    }

    pub fn protein_any(protein: &Protein) -> Self {
        Self::protein(protein, ConformationSpec::Any)
    }

    pub fn protein_at(protein: &Protein, indices: Vec<usize>) -> Self {
        Self::protein(protein, ConformationSpec::indices(indices))
    }

    pub fn check_traits(&self) -> Result<(), DomainError> {
        match (&self.component, &self.conformation) {
            (Component::Drug(d), ConformationSpec::None) => d.check_traits(),
            (Component::Drug(d), _) => Err(DomainError::Validation(format!(
                "el fármaco '{}' no puede llevar restricción de conformación",
                d.name
            ))),
            (Component::Protein(p), ConformationSpec::None) => Err(DomainError::Validation(format!(
                "la proteína '{}' necesita comodín o lista concreta de conformaciones",
                p.name
            ))),
            (Component::Protein(p), ConformationSpec::Any) => p.check_traits(),
            (Component::Protein(p), ConformationSpec::Indices(v)) => {
                p.check_traits()?;
                if v.is_empty() {
                    return Err(DomainError::Validation(format!(
                        "la proteína '{}' lleva una lista de conformaciones vacía",
                        p.name
                    )));
                }
                if let Some(&bad) = v.iter().find(|&&i| i >= p.conformation_count()) {
                    return Err(DomainError::Validation(format!(
                        "índice de conformación {} fuera de rango para '{}' ({} conformaciones)",
                        bad,
                        p.name,
                        p.conformation_count()
                    )));
                }
                Ok(())
            }
        }
    }

    /// Clave de firma de este slot bajo una resolución dada. Solo tiene
    /// sentido sobre slots ya resueltos (sin comodines).
    pub fn signature_key(&self, resolution: SignatureResolution) -> SignatureKey {
        let conformation = match (resolution, &self.conformation) {
            (SignatureResolution::ComponentConformation, ConformationSpec::Indices(v)) => {
                Some(v.clone())
            }
            _ => None,
        };
        SignatureKey { component: self.component.id(),
                       conformation }
    }

    /// Opciones concretas a las que se resuelve este slot por enumeración.
    fn resolution_choices(&self) -> Vec<ConformationSpec> {
        match &self.conformation {
            ConformationSpec::Any => (0..self.component.conformation_count())
                .map(|i| ConformationSpec::Indices(vec![i]))
                .collect(),
            ConformationSpec::Indices(v) if v.len() > 1 => {
                v.iter().map(|&i| ConformationSpec::Indices(vec![i])).collect()
            }
            other => vec![other.clone()],
        }
    }
}

/// Una regla de interacción: componentes sujeto, componentes objeto y una
/// clase de reacción del vocabulario fijo. Una regla solo tiene sentido
/// frente al catálogo de un modelo concreto y debe revalidarse si el
/// catálogo mengua.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub subject: Vec<RuleSlot>,
    pub object: Vec<RuleSlot>,
    pub kind: RuleKind,
    id: Uuid,
}

/// Una regla con todos sus comodines resueltos a conformaciones concretas.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRule {
    pub subject: Vec<RuleSlot>,
    pub object: Vec<RuleSlot>,
}

impl Rule {
    pub fn new(subject: Vec<RuleSlot>, object: Vec<RuleSlot>, kind: RuleKind) -> Result<Self, DomainError> {
        let rule = Rule { subject,
                          object,
                          kind,
                          id: Uuid::new_v4() };
        rule.check_traits()?;
        Ok(rule)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Validez de la regla frente a sus propios slots.
    pub fn check_traits(&self) -> Result<(), DomainError> {
        if self.subject.is_empty() || self.object.is_empty() {
            return Err(DomainError::Validation("una regla necesita sujeto y objeto".to_string()));
        }
        for slot in self.subject.iter().chain(self.object.iter()) {
            slot.check_traits()?;
        }
        match self.kind.reaction_class() {
            ReactionClass::Association => Ok(()),
            ReactionClass::Dissociation => self.check_dissociation_containment(),
            ReactionClass::Conversion => self.check_conversion_shape(),
            ReactionClass::Competition => {
                if self.subject.len() != 1 || self.object.len() != 1 {
                    return Err(DomainError::Validation(
                        "una regla de competición relaciona exactamente un componente con otro".to_string(),
                    ));
                }
                Ok(())
            }
        }
    }

    /// No se puede disociar material que no está presente: la firma del
    /// sujeto debe estar contenida por completo en la del objeto.
    fn check_dissociation_containment(&self) -> Result<(), DomainError> {
        let subject = count_slots(&self.subject, SignatureResolution::Component);
        let object = count_slots(&self.object, SignatureResolution::Component);
        if !object.contains(&subject) {
            return Err(DomainError::Validation(format!(
                "el sujeto de '{}' no está contenido en su objeto",
                self
            )));
        }
        Ok(())
    }

    /// Una conversión reescribe conformaciones en el sitio: mismos
    /// componentes (proteínas) a ambos lados y objeto concreto.
    fn check_conversion_shape(&self) -> Result<(), DomainError> {
        if self.subject.len() != self.object.len() {
            return Err(DomainError::Validation(format!(
                "la conversión '{}' necesita el mismo número de slots a ambos lados",
                self
            )));
        }
        for (s, o) in self.subject.iter().zip(self.object.iter()) {
            if s.component.id() != o.component.id() {
                return Err(DomainError::Validation(format!(
                    "la conversión '{}' cambia de componente, no solo de conformación",
                    self
                )));
            }
            if !s.component.is_protein() {
                return Err(DomainError::Validation(format!(
                    "la conversión '{}' solo puede operar sobre proteínas",
                    self
                )));
            }
            match &o.conformation {
                ConformationSpec::Indices(v) if v.len() == 1 => {}
                _ => {
                    return Err(DomainError::Validation(format!(
                        "el objeto de la conversión '{}' necesita una conformación concreta única",
                        self
                    )))
                }
            }
        }
        Ok(())
    }

    /// Revalidación frente al catálogo: todo componente referenciado debe
    /// seguir existiendo.
    pub fn check_against_catalog(&self, drugs: &[Drug], proteins: &[Protein]) -> Result<(), DomainError> {
        for slot in self.subject.iter().chain(self.object.iter()) {
            let present = match &slot.component {
                Component::Drug(d) => drugs.iter().any(|x| x.id() == d.id()),
                Component::Protein(p) => proteins.iter().any(|x| x.id() == p.id()),
            };
            if !present {
                return Err(DomainError::MissingComponent(slot.component.name().to_string()));
            }
        }
        Ok(())
    }

    /// ¿Necesita algún slot resolución por enumeración?
    pub fn needs_resolution(&self) -> bool {
        self.subject
            .iter()
            .chain(self.object.iter())
            .any(|s| s.conformation.needs_resolution())
    }

    /// Resolución con la que se generan y comparan las firmas de esta regla.
    pub fn signature_resolution(&self) -> SignatureResolution {
        if self.needs_resolution() {
            SignatureResolution::ComponentConformation
        } else {
            SignatureResolution::Component
        }
    }

    /// Resuelve cada slot con comodín (o con lista multi-índice) enumerando
    /// cada conformación legal: producto cartesiano sobre todos los slots a
    /// resolver, una elección concreta por slot y combinación.
    pub fn conformation_combinations(&self) -> Vec<ResolvedRule> {
        let slot_choices: Vec<Vec<ConformationSpec>> = self.subject
                                                           .iter()
                                                           .chain(self.object.iter())
                                                           .map(RuleSlot::resolution_choices)
                                                           .collect();
        let mut combinations = Vec::new();
        let mut picks = vec![0usize; slot_choices.len()];
        loop {
            let mut slots: Vec<RuleSlot> = self.subject.iter().chain(self.object.iter()).cloned().collect();
            for (slot, (choices, &pick)) in slots.iter_mut().zip(slot_choices.iter().zip(picks.iter())) {
                slot.conformation = choices[pick].clone();
            }
            let object = slots.split_off(self.subject.len());
            combinations.push(ResolvedRule { subject: slots, object });

            // avanzar el contador mixto del producto cartesiano
            let mut i = picks.len();
            loop {
                if i == 0 {
                    return combinations;
                }
                i -= 1;
                picks[i] += 1;
                if picks[i] < slot_choices[i].len() {
                    break;
                }
                picks[i] = 0;
            }
        }
    }

    /// Una firma de aceptación por combinación resuelta; sin comodines
    /// colapsa a una única firma por identidad de componente.
    pub fn generate_signature_list(&self) -> Result<Vec<CountingSignature>, DomainError> {
        let resolution = self.signature_resolution();
        self.conformation_combinations()
            .iter()
            .map(|resolved| resolved.signature(self.kind.reaction_class(), resolution))
            .collect()
    }
}

impl ResolvedRule {
    /// Firma de conteo de esta combinación. Las clases de asociación
    /// rellenan sujeto/objeto/fusión; las de disociación, fusión-menos-un-lado
    /// (el resto); conversión y competición solo sujeto y objeto.
    pub fn signature(&self,
                     class: ReactionClass,
                     resolution: SignatureResolution)
                     -> Result<CountingSignature, DomainError> {
        let mut signature = CountingSignature::new(resolution);
        signature.subject = count_slots(&self.subject, resolution);
        signature.object = count_slots(&self.object, resolution);
        match class {
            ReactionClass::Association => {
                signature.third_state = signature.subject.union(&signature.object);
            }
            ReactionClass::Dissociation => {
                signature.third_state =
                    signature.object.subtract(&signature.subject).ok_or_else(|| {
                                                                      DomainError::Validation(
                            "el sujeto de la disociación no está contenido en su objeto".to_string(),
                        )
                                                                  })?;
            }
            ReactionClass::Conversion | ReactionClass::Competition => {}
        }
        Ok(signature)
    }
}

fn count_slots(slots: &[RuleSlot], resolution: SignatureResolution) -> ComponentCount {
    let mut counts = ComponentCount::new();
    for slot in slots {
        counts.add(slot.signature_key(resolution));
    }
    counts
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = |slots: &[RuleSlot]| {
            slots.iter().map(|s| s.component.symbol().to_string()).collect::<Vec<_>>().join("+")
        };
        write!(f, "{}{}{}", side(&self.subject), self.kind.phrase(), side(&self.object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drug_a() -> Drug {
        Drug::new("adrenaline", "A").unwrap()
    }

    fn receptor() -> Protein {
        Protein::new("beta adrenergic receptor",
                     "R",
                     vec!["inactive".to_string(), "active".to_string()],
                     vec!["".to_string(), "*".to_string()]).unwrap()
    }

    #[test]
    fn vocabulary_has_eleven_kinds() {
        assert_eq!(RuleKind::ALL.len(), 11);
    }

    #[test]
    fn wildcard_association_expands_to_one_signature_per_conformation() {
        let a = drug_a();
        let r = receptor();
        let rule = Rule::new(vec![RuleSlot::drug(&a)],
                             vec![RuleSlot::protein_any(&r)],
                             RuleKind::ReversiblyAssociatesWith).unwrap();
        let signatures = rule.generate_signature_list().unwrap();
        assert_eq!(signatures.len(), 2);
        assert_eq!(signatures[0].resolution, SignatureResolution::ComponentConformation);
        assert_ne!(signatures[0], signatures[1]);
    }

    #[test]
    fn concrete_rule_collapses_to_identity_signature() {
        let a = drug_a();
        let r = receptor();
        let rule = Rule::new(vec![RuleSlot::drug(&a)],
                             vec![RuleSlot::protein_at(&r, vec![0])],
                             RuleKind::AssociatesWith).unwrap();
        let signatures = rule.generate_signature_list().unwrap();
        assert_eq!(signatures.len(), 1);
        assert_eq!(signatures[0].resolution, SignatureResolution::Component);
        assert_eq!(signatures[0].third_state.total(), 2);
    }

    #[test]
    fn multi_index_list_enumerates_listed_conformations_only() {
        let a = drug_a();
        let p = Protein::new("transporter",
                             "DAT",
                             vec!["OO".into(), "OC".into(), "IC".into(), "IO".into()],
                             vec!["oo".into(), "oc".into(), "ic".into(), "io".into()]).unwrap();
        let rule = Rule::new(vec![RuleSlot::drug(&a)],
                             vec![RuleSlot::protein_at(&p, vec![0, 3])],
                             RuleKind::ReversiblyAssociatesWith).unwrap();
        assert_eq!(rule.conformation_combinations().len(), 2);
    }

    #[test]
    fn drug_with_conformation_is_invalid() {
        let a = drug_a();
        let r = receptor();
        let mut slot = RuleSlot::drug(&a);
        slot.conformation = ConformationSpec::Any;
        let result = Rule::new(vec![slot],
                               vec![RuleSlot::protein_any(&r)],
                               RuleKind::AssociatesWith);
        assert!(result.is_err());
    }

    #[test]
    fn out_of_range_conformation_is_invalid() {
        let a = drug_a();
        let r = receptor();
        let result = Rule::new(vec![RuleSlot::drug(&a)],
                               vec![RuleSlot::protein_at(&r, vec![7])],
                               RuleKind::AssociatesWith);
        assert!(result.is_err());
    }

    #[test]
    fn dissociation_subject_must_be_contained_in_object() {
        let a = drug_a();
        let r = receptor();
        let bad = Rule::new(vec![RuleSlot::drug(&a)],
                            vec![RuleSlot::protein_any(&r)],
                            RuleKind::DissociatesFrom);
        assert!(bad.is_err());

        let good = Rule::new(vec![RuleSlot::drug(&a)],
                             vec![RuleSlot::drug(&a), RuleSlot::protein_any(&r)],
                             RuleKind::DissociatesFrom);
        assert!(good.is_ok());
    }

    #[test]
    fn rule_revalidates_against_a_shrunk_catalog() {
        let a = drug_a();
        let r = receptor();
        let rule = Rule::new(vec![RuleSlot::drug(&a)],
                             vec![RuleSlot::protein_any(&r)],
                             RuleKind::AssociatesWith).unwrap();
        assert!(rule.check_against_catalog(&[a.clone()], &[r.clone()]).is_ok());
        assert!(rule.check_against_catalog(&[], &[r]).is_err());
    }

    #[test]
    fn conversion_keeps_components_and_needs_concrete_object() {
        let r = receptor();
        let ok = Rule::new(vec![RuleSlot::protein_at(&r, vec![0])],
                           vec![RuleSlot::protein_at(&r, vec![1])],
                           RuleKind::ReversiblyConvertsTo);
        assert!(ok.is_ok());

        let wildcard_object = Rule::new(vec![RuleSlot::protein_at(&r, vec![0])],
                                        vec![RuleSlot::protein_any(&r)],
                                        RuleKind::ConvertsTo);
        assert!(wildcard_object.is_err());
    }
}
