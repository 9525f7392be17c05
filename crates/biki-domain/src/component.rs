use crate::{Drug, Protein};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Un componente del catálogo tal como lo referencia un slot de regla.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Component {
    Drug(Drug),
    Protein(Protein),
}

impl Component {
    pub fn id(&self) -> Uuid {
        match self {
            Component::Drug(d) => d.id(),
            Component::Protein(p) => p.id(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Component::Drug(d) => &d.name,
            Component::Protein(p) => &p.name,
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            Component::Drug(d) => &d.symbol,
            Component::Protein(p) => &p.symbol,
        }
    }

    /// Cero para fármacos.
    pub fn conformation_count(&self) -> usize {
        match self {
            Component::Drug(_) => 0,
            Component::Protein(p) => p.conformation_count(),
        }
    }

    pub fn is_protein(&self) -> bool {
        matches!(self, Component::Protein(_))
    }
}

/// Especificación de conformación de un slot de regla.
///
/// - `None`: el slot es un fármaco y no lleva conformación.
/// - `Any`: comodín, se resuelve por enumeración antes de generar firmas.
/// - `Indices`: selección concreta no vacía. Una lista con más de un índice
///   significa "cualquiera de estas conformaciones" y también se resuelve por
///   enumeración; dentro de un State del grafo la selección ya es siempre un
///   único índice concreto por resolución previa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConformationSpec {
    None,
    Any,
    Indices(Vec<usize>),
}

impl ConformationSpec {
    /// Construye una selección concreta ordenada y sin duplicados.
    pub fn indices(mut indices: Vec<usize>) -> Self {
        indices.sort_unstable();
        indices.dedup();
        ConformationSpec::Indices(indices)
    }

    /// ¿Necesita este slot resolución por enumeración?
    pub fn needs_resolution(&self) -> bool {
        match self {
            ConformationSpec::Any => true,
            ConformationSpec::Indices(v) => v.len() > 1,
            ConformationSpec::None => false,
        }
    }

    /// ¿Acepta esta especificación la selección concreta de un State?
    pub fn accepts(&self, conformation: Option<&[usize]>) -> bool {
        match (self, conformation) {
            (ConformationSpec::None, None) => true,
            (ConformationSpec::Any, Some(_)) => true,
            (ConformationSpec::Indices(v), Some(c)) => {
                v.as_slice() == c || (c.len() == 1 && v.contains(&c[0]))
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_normalized() {
        let spec = ConformationSpec::indices(vec![3, 0, 3]);
        assert_eq!(spec, ConformationSpec::Indices(vec![0, 3]));
    }

    #[test]
    fn wildcard_accepts_any_concrete_selection() {
        assert!(ConformationSpec::Any.accepts(Some(&[1])));
        assert!(!ConformationSpec::Any.accepts(None));
    }

    #[test]
    fn multi_index_spec_accepts_each_listed_conformation() {
        let spec = ConformationSpec::indices(vec![0, 3]);
        assert!(spec.accepts(Some(&[0])));
        assert!(spec.accepts(Some(&[3])));
        assert!(!spec.accepts(Some(&[1])));
    }
}
