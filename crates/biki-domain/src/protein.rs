use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Receptor del catálogo con una o más conformaciones nombradas.
///
/// Invariante: `conformation_names` y `conformation_symbols` tienen la misma
/// longitud y al menos una entrada. El invariante se rompe editando, no
/// construyendo, por eso `check_traits` es una llamada explícita que el
/// colaborador de edición debe invocar en cada frontera de edición.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Protein {
    pub name: String,
    pub symbol: String,
    pub conformation_names: Vec<String>,
    pub conformation_symbols: Vec<String>,
    id: Uuid,
}

impl Protein {
    pub fn new(name: impl Into<String>,
               symbol: impl Into<String>,
               conformation_names: Vec<String>,
               conformation_symbols: Vec<String>)
               -> Result<Self, DomainError> {
        let protein = Protein { name: name.into(),
                                symbol: symbol.into(),
                                conformation_names,
                                conformation_symbols,
                                id: Uuid::new_v4() };
        protein.check_traits()?;
        Ok(protein)
    }

    /// Valida los campos editables, incluida la correspondencia
    /// nombre/símbolo de conformaciones.
    pub fn check_traits(&self) -> Result<(), DomainError> {
        if self.name.is_empty() {
            return Err(DomainError::Validation("una proteína necesita nombre".to_string()));
        }
        if self.symbol.is_empty() {
            return Err(DomainError::Validation(format!("la proteína '{}' necesita símbolo", self.name)));
        }
        if self.conformation_names.is_empty() {
            return Err(DomainError::Validation(format!("la proteína '{}' necesita al menos una conformación",
                                                       self.name)));
        }
        if self.conformation_names.len() != self.conformation_symbols.len() {
            return Err(DomainError::Validation(format!(
                "la proteína '{}' tiene {} nombres de conformación pero {} símbolos",
                self.name,
                self.conformation_names.len(),
                self.conformation_symbols.len()
            )));
        }
        Ok(())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn conformation_count(&self) -> usize {
        self.conformation_names.len()
    }
}

impl fmt::Display for Protein {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {} conformaciones)", self.name, self.symbol, self.conformation_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn receptor() -> Protein {
        Protein::new("beta adrenergic receptor",
                     "R",
                     vec!["inactive".to_string(), "active".to_string()],
                     vec!["".to_string(), "*".to_string()]).unwrap()
    }

    #[test]
    fn protein_has_conformation_lists() {
        let protein = receptor();
        assert_eq!(protein.conformation_count(), 2);
        assert_eq!(protein.conformation_symbols[1], "*");
    }

    #[test]
    fn mismatched_conformation_lists_fail_validation() {
        let mut protein = receptor();
        protein.conformation_symbols.pop();
        assert!(protein.check_traits().is_err());
    }

    #[test]
    fn protein_requires_a_conformation() {
        let result = Protein::new("bare", "B", vec![], vec![]);
        assert!(result.is_err());
    }
}
