//! Firmas de conteo: huellas multiconjunto baratas usadas para pre-filtrar
//! candidatos antes de las comprobaciones caras de topología de enlaces.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Resolución con la que se cuenta: solo identidad de componente, o
/// identidad más selección de conformaciones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignatureResolution {
    Component,
    ComponentConformation,
}

/// Clave de conteo de una firma.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignatureKey {
    pub component: Uuid,
    pub conformation: Option<Vec<usize>>,
}

/// Multiconjunto (clave → cuenta) de componentes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentCount {
    counts: IndexMap<SignatureKey, usize>,
}

impl ComponentCount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: SignatureKey) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    pub fn get(&self, key: &SignatureKey) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Número total de componentes contados.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SignatureKey, usize)> {
        self.counts.iter().map(|(k, &c)| (k, c))
    }

    /// Inclusión multiconjunto: toda cuenta de `other` cabe en `self`.
    pub fn contains(&self, other: &ComponentCount) -> bool {
        other.iter().all(|(key, count)| self.get(key) >= count)
    }

    /// Suma de dos multiconjuntos.
    pub fn union(&self, other: &ComponentCount) -> ComponentCount {
        let mut merged = self.clone();
        for (key, count) in other.iter() {
            *merged.counts.entry(key.clone()).or_insert(0) += count;
        }
        merged
    }

    /// Resta multiconjunto; `None` si `other` no está contenido en `self`.
    pub fn subtract(&self, other: &ComponentCount) -> Option<ComponentCount> {
        if !self.contains(other) {
            return None;
        }
        let mut rest = ComponentCount::new();
        for (key, count) in self.iter() {
            let remaining = count - other.get(key);
            if remaining > 0 {
                rest.counts.insert(key.clone(), remaining);
            }
        }
        Some(rest)
    }
}

/// Huella multiconjunto de una regla (o de un par de estados candidatos).
///
/// `third_state` guarda las cuentas del estado fusionado para las clases de
/// asociación, y el resto objeto-menos-sujeto para las de disociación; las
/// clases de conversión y competición solo rellenan sujeto y objeto.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountingSignature {
    pub resolution: SignatureResolution,
    pub subject: ComponentCount,
    pub object: ComponentCount,
    pub third_state: ComponentCount,
}

impl CountingSignature {
    pub fn new(resolution: SignatureResolution) -> Self {
        CountingSignature { resolution,
                            subject: ComponentCount::new(),
                            object: ComponentCount::new(),
                            third_state: ComponentCount::new() }
    }

    /// Test de inclusión sustractiva: una firma consulta pasa frente a una
    /// firma de aceptación si puede restarse el patrón de aceptación y aún
    /// quedan las cuentas exigidas en el lado sujeto y en el lado objeto.
    /// Este test tolerante es lo que permite la oligomerización repetida sin
    /// casos especiales por paso.
    pub fn subtractive_includes(&self, acceptance: &CountingSignature) -> bool {
        self.subject.contains(&acceptance.subject)
        && self.object.contains(&acceptance.object)
        && self.third_state.contains(&acceptance.third_state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(component: Uuid, conformation: Option<Vec<usize>>) -> SignatureKey {
        SignatureKey { component, conformation }
    }

    #[test]
    fn contains_is_multiset_inclusion() {
        let id = Uuid::new_v4();
        let mut big = ComponentCount::new();
        big.add(key(id, None));
        big.add(key(id, None));
        let mut small = ComponentCount::new();
        small.add(key(id, None));
        assert!(big.contains(&small));
        assert!(!small.contains(&big));
    }

    #[test]
    fn subtract_returns_remainder() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut whole = ComponentCount::new();
        whole.add(key(a, None));
        whole.add(key(b, Some(vec![0])));
        let mut part = ComponentCount::new();
        part.add(key(a, None));
        let rest = whole.subtract(&part).unwrap();
        assert_eq!(rest.get(&key(b, Some(vec![0]))), 1);
        assert_eq!(rest.get(&key(a, None)), 0);
        assert!(part.subtract(&whole).is_none());
    }

    #[test]
    fn conformation_distinguishes_keys() {
        let id = Uuid::new_v4();
        let mut counts = ComponentCount::new();
        counts.add(key(id, Some(vec![0])));
        assert_eq!(counts.get(&key(id, Some(vec![1]))), 0);
    }
}
