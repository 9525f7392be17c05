//! biki-domain: catálogo validado (fármacos y proteínas multiconformación),
//! reglas de interacción y firmas de conteo.
pub mod component;
pub mod drug;
pub mod error;
pub mod protein;
pub mod rule;
pub mod signature;

pub use component::{Component, ConformationSpec};
pub use drug::Drug;
pub use error::DomainError;
pub use protein::Protein;
pub use rule::{ReactionClass, ResolvedRule, Reversibility, Rule, RuleKind, RuleSlot};
pub use signature::{ComponentCount, CountingSignature, SignatureKey, SignatureResolution};
