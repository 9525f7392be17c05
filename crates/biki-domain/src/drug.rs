use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Ligando del catálogo: una entidad sin estado interno que no puede llevar
/// conformación. `name` y `symbol` son editables por el colaborador de
/// edición; la identidad (`id`) se fija en la construcción y no cambia.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drug {
    pub name: String,
    pub symbol: String,
    id: Uuid,
}

impl Drug {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Result<Self, DomainError> {
        let drug = Drug { name: name.into(),
                          symbol: symbol.into(),
                          id: Uuid::new_v4() };
        drug.check_traits()?;
        Ok(drug)
    }

    /// Valida los campos editables. Es una llamada explícita porque el
    /// invariante puede romperse editando, no construyendo.
    pub fn check_traits(&self) -> Result<(), DomainError> {
        if self.name.is_empty() {
            return Err(DomainError::Validation("un fármaco necesita nombre".to_string()));
        }
        if self.symbol.is_empty() {
            return Err(DomainError::Validation(format!("el fármaco '{}' necesita símbolo", self.name)));
        }
        Ok(())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl fmt::Display for Drug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.symbol)
    }
}
