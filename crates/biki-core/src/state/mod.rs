//! Estados: complejos moleculares concretos con topología interna de enlaces.
//!
//! Espacio de índices de un estado: primero los fármacos, después las
//! proteínas. Todo estado residente en el grafo está en forma canónica
//! (componentes ordenados, empates resueltos por la permutación que minimiza
//! el conjunto de enlaces), de modo que la igualdad estructural completa es
//! igualdad llana de contenido.

pub mod link;

pub use link::{Link, LinkEndpoint};

use crate::combinatorics::permutations;
use crate::hashing::to_canonical_json;
use biki_domain::{ComponentCount, Drug, Protein, RuleSlot, SignatureKey, SignatureResolution};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeSet;
use uuid::Uuid;

/// Una instancia de proteína dentro de un estado, con su selección concreta
/// (no vacía) de conformaciones. El comodín solo es legal en patrones de
/// regla, nunca aquí.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConformedProtein {
    pub protein: Protein,
    pub conformation: Vec<usize>,
}

/// Vista de un componente de estado por índice global.
#[derive(Debug, Clone, Copy)]
pub enum ComponentRef<'a> {
    Drug(&'a Drug),
    Protein(&'a Protein, &'a [usize]),
}

impl<'a> ComponentRef<'a> {
    pub fn id(&self) -> Uuid {
        match self {
            ComponentRef::Drug(d) => d.id(),
            ComponentRef::Protein(p, _) => p.id(),
        }
    }

    pub fn symbol(&self) -> &'a str {
        match self {
            ComponentRef::Drug(d) => &d.symbol,
            ComponentRef::Protein(p, _) => &p.symbol,
        }
    }

    pub fn is_protein(&self) -> bool {
        matches!(self, ComponentRef::Protein(..))
    }

    pub fn conformation(&self) -> Option<&'a [usize]> {
        match self {
            ComponentRef::Drug(_) => None,
            ComponentRef::Protein(_, c) => Some(c),
        }
    }

    /// ¿Satisface este componente el slot de regla dado? Un comodín en el
    /// lado de referencia acepta cualquier conformación concreta.
    pub fn matches_slot(&self, slot: &RuleSlot) -> bool {
        slot.component.id() == self.id() && slot.conformation.accepts(self.conformation())
    }

    pub fn signature_key(&self, resolution: SignatureResolution) -> SignatureKey {
        let conformation = match (resolution, self.conformation()) {
            (SignatureResolution::ComponentConformation, Some(c)) => Some(c.to_vec()),
            _ => None,
        };
        SignatureKey { component: self.id(),
                       conformation }
    }
}

/// Un complejo molecular concreto del grafo de reacciones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct State {
    drugs: Vec<Drug>,
    proteins: Vec<ConformedProtein>,
    internal_links: BTreeSet<Link>,
    id: Uuid,
    number: Option<u32>,
    name: Option<String>,
    symbol: Option<String>,
    variable: Option<String>,
}

impl State {
    pub(crate) fn assemble(drugs: Vec<Drug>,
                           proteins: Vec<ConformedProtein>,
                           internal_links: BTreeSet<Link>)
                           -> State {
        State { drugs,
                proteins,
                internal_links,
                id: Uuid::new_v4(),
                number: None,
                name: None,
                symbol: None,
                variable: None }
    }

    /// Estado semilla: un fármaco suelto.
    pub fn from_drug(drug: Drug) -> State {
        State::assemble(vec![drug], Vec::new(), BTreeSet::new())
    }

    /// Estado semilla: una proteína suelta en una conformación concreta.
    pub fn from_protein_conformation(protein: Protein, index: usize) -> State {
        let conformed = ConformedProtein { protein,
                                           conformation: vec![index] };
        State::assemble(Vec::new(), vec![conformed], BTreeSet::new())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn drugs(&self) -> &[Drug] {
        &self.drugs
    }

    pub fn proteins(&self) -> &[ConformedProtein] {
        &self.proteins
    }

    pub fn links(&self) -> &BTreeSet<Link> {
        &self.internal_links
    }

    pub fn component_count(&self) -> usize {
        self.drugs.len() + self.proteins.len()
    }

    pub fn component(&self, index: usize) -> ComponentRef<'_> {
        if index < self.drugs.len() {
            ComponentRef::Drug(&self.drugs[index])
        } else {
            let p = &self.proteins[index - self.drugs.len()];
            ComponentRef::Protein(&p.protein, &p.conformation)
        }
    }

    pub fn components(&self) -> impl Iterator<Item = ComponentRef<'_>> {
        (0..self.component_count()).map(move |i| self.component(i))
    }

    pub fn number(&self) -> Option<u32> {
        self.number
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    pub fn variable(&self) -> Option<&str> {
        self.variable.as_deref()
    }

    pub(crate) fn set_number(&mut self, number: u32) {
        self.number = Some(number);
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    pub(crate) fn set_symbol(&mut self, symbol: String) {
        self.symbol = Some(symbol);
    }

    pub(crate) fn set_variable(&mut self, variable: String) {
        self.variable = Some(variable);
    }

    pub(crate) fn insert_link(&mut self, link: Link) {
        self.internal_links.insert(link);
    }

    /// Coincidencia mínima contra una lista de slots de referencia: cada
    /// elemento de referencia consume con avidez un componente libre del
    /// estado; los componentes sobrantes se permiten.
    pub fn matches_minimal(&self, slots: &[RuleSlot]) -> bool {
        let mut used = vec![false; self.component_count()];
        'slots: for slot in slots {
            for i in 0..self.component_count() {
                if !used[i] && self.component(i).matches_slot(slot) {
                    used[i] = true;
                    continue 'slots;
                }
            }
            return false;
        }
        true
    }

    /// Coincidencia exacta: multiconjuntos y topología de enlaces coinciden
    /// por completo. Ambos estados deben estar en forma canónica, lo que es
    /// siempre cierto para estados residentes en el grafo.
    pub fn matches_exactly(&self, other: &State) -> bool {
        self.content_key() == other.content_key()
    }

    /// Todas las posiciones de componente que satisfacen un slot.
    pub fn slot_positions(&self, slot: &RuleSlot) -> Vec<usize> {
        (0..self.component_count()).filter(|&i| self.component(i).matches_slot(slot)).collect()
    }

    /// Cuentas de firma de los componentes en las posiciones dadas.
    pub(crate) fn count_for_indices(&self,
                                    indices: &[usize],
                                    resolution: SignatureResolution)
                                    -> ComponentCount {
        let mut counts = ComponentCount::new();
        for &i in indices {
            counts.add(self.component(i).signature_key(resolution));
        }
        counts
    }

    pub fn signature_count(&self, resolution: SignatureResolution) -> ComponentCount {
        let all: Vec<usize> = (0..self.component_count()).collect();
        self.count_for_indices(&all, resolution)
    }

    /// ¿Están los componentes `i` y `j` unidos directamente por algún enlace?
    pub fn adjacent(&self, i: usize, j: usize) -> bool {
        self.internal_links.iter().any(|l| l.joins(i, j))
    }

    /// ¿Forman los índices dados un subgrafo conexo bajo los enlaces del
    /// estado?
    pub(crate) fn connected(&self, indices: &[usize]) -> bool {
        if indices.len() <= 1 {
            return true;
        }
        let mut reached = vec![indices[0]];
        let mut frontier = vec![indices[0]];
        while let Some(current) = frontier.pop() {
            for &candidate in indices {
                if !reached.contains(&candidate) && self.adjacent(current, candidate) {
                    reached.push(candidate);
                    frontier.push(candidate);
                }
            }
        }
        reached.len() == indices.len()
    }

    /// Clave de contenido canónica: identidad de componentes, conformaciones
    /// y topología de enlaces; excluye id y anotaciones. Dos estados
    /// estructuralmente iguales comparten clave.
    pub fn content_key(&self) -> String {
        let value = json!({
            "drugs": self.drugs.iter().map(|d| d.id().to_string()).collect::<Vec<_>>(),
            "proteins": self.proteins
                            .iter()
                            .map(|p| json!([p.protein.id().to_string(), p.conformation]))
                            .collect::<Vec<_>>(),
            "links": serde_json::to_value(&self.internal_links).unwrap_or_default(),
        });
        to_canonical_json(&value)
    }

    /// Fusión de dos estados en un espacio de índices común. Devuelve el
    /// estado fusionado (sin canonicalizar) y los mapas de traducción de
    /// índices de cada operando al espacio fusionado.
    pub(crate) fn merge(&self, other: &State) -> (State, Vec<usize>, Vec<usize>) {
        let nd_self = self.drugs.len();
        let nd_other = other.drugs.len();
        let nd = nd_self + nd_other;
        let np_self = self.proteins.len();

        let mut self_map = vec![0usize; self.component_count()];
        for g in 0..self.component_count() {
            self_map[g] = if g < nd_self { g } else { nd + (g - nd_self) };
        }
        let mut other_map = vec![0usize; other.component_count()];
        for g in 0..other.component_count() {
            other_map[g] = if g < nd_other { nd_self + g } else { nd + np_self + (g - nd_other) };
        }

        let mut drugs = self.drugs.clone();
        drugs.extend(other.drugs.iter().cloned());
        let mut proteins = self.proteins.clone();
        proteins.extend(other.proteins.iter().cloned());

        let mut links: BTreeSet<Link> =
            self.internal_links.iter().map(|l| l.translate(&self_map)).collect();
        links.extend(other.internal_links.iter().map(|l| l.translate(&other_map)));

        (State::assemble(drugs, proteins, links), self_map, other_map)
    }

    /// Fragmento canónico con los componentes de las posiciones dadas; se
    /// conservan solo los enlaces interiores al fragmento.
    pub(crate) fn restricted_to(&self, indices: &[usize]) -> State {
        let nd = self.drugs.len();
        let mut keep = indices.to_vec();
        keep.sort_unstable();

        let mut map = vec![usize::MAX; self.component_count()];
        let mut drugs = Vec::new();
        for &i in &keep {
            if i < nd {
                map[i] = drugs.len();
                drugs.push(self.drugs[i].clone());
            }
        }
        let base = drugs.len();
        let mut proteins = Vec::new();
        for &i in &keep {
            if i >= nd {
                map[i] = base + proteins.len();
                proteins.push(self.proteins[i - nd].clone());
            }
        }
        let links: BTreeSet<Link> =
            self.internal_links
                .iter()
                .filter(|l| l.leaf_indices().iter().all(|x| keep.binary_search(x).is_ok()))
                .map(|l| l.translate(&map))
                .collect();
        State::assemble(drugs, proteins, links).canonicalized()
    }

    /// Copia canónica con las conformaciones reescritas en las posiciones
    /// asignadas (patrón objeto de una conversión).
    pub(crate) fn rewrite_conformations(&self, assignments: &[(usize, Vec<usize>)]) -> State {
        let nd = self.drugs.len();
        let mut proteins = self.proteins.clone();
        for (index, conformation) in assignments {
            if *index >= nd {
                proteins[*index - nd].conformation = conformation.clone();
            }
        }
        State::assemble(self.drugs.clone(), proteins, self.internal_links.clone()).canonicalized()
    }

    /// Forma canónica: componentes ordenados por clave estable y, entre
    /// bloques de componentes idénticos, la permutación que produce el
    /// conjunto de enlaces lexicográficamente menor. Garantiza que dos
    /// síntesis del mismo complejo por caminos distintos coinciden byte a
    /// byte en su clave de contenido.
    pub(crate) fn canonicalized(self) -> State {
        let nd = self.drugs.len();
        let np = self.proteins.len();

        let mut drug_order: Vec<usize> = (0..nd).collect();
        drug_order.sort_by(|&a, &b| drug_sort_key(&self.drugs[a]).cmp(&drug_sort_key(&self.drugs[b])));
        let mut protein_order: Vec<usize> = (0..np).collect();
        protein_order.sort_by(|&a, &b| {
                        protein_sort_key(&self.proteins[a]).cmp(&protein_sort_key(&self.proteins[b]))
                    });

        let drug_variants = tie_variants(&drug_order, |a, b| {
            drug_sort_key(&self.drugs[a]) == drug_sort_key(&self.drugs[b])
        });
        let protein_variants = tie_variants(&protein_order, |a, b| {
            protein_sort_key(&self.proteins[a]) == protein_sort_key(&self.proteins[b])
        });

        let mut best: Option<(Vec<Link>, Vec<usize>, Vec<usize>)> = None;
        for d_order in &drug_variants {
            for p_order in &protein_variants {
                let mut map = vec![0usize; nd + np];
                for (new_pos, &old) in d_order.iter().enumerate() {
                    map[old] = new_pos;
                }
                for (new_pos, &old) in p_order.iter().enumerate() {
                    map[nd + old] = nd + new_pos;
                }
                let links: BTreeSet<Link> =
                    self.internal_links.iter().map(|l| l.translate(&map)).collect();
                let links: Vec<Link> = links.into_iter().collect();
                let better = match &best {
                    None => true,
                    Some((current, _, _)) => links < *current,
                };
                if better {
                    best = Some((links, d_order.clone(), p_order.clone()));
                }
            }
        }

        // siempre hay al menos una variante (la identidad)
        let (links, d_order, p_order) = match best {
            Some(found) => found,
            None => (Vec::new(), drug_order, protein_order),
        };
        let drugs: Vec<Drug> = d_order.iter().map(|&i| self.drugs[i].clone()).collect();
        let proteins: Vec<ConformedProtein> =
            p_order.iter().map(|&i| self.proteins[i].clone()).collect();
        State { drugs,
                proteins,
                internal_links: links.into_iter().collect(),
                id: self.id,
                number: self.number,
                name: self.name,
                symbol: self.symbol,
                variable: self.variable }
    }
}

fn drug_sort_key(drug: &Drug) -> (String, String, Uuid) {
    (drug.symbol.clone(), drug.name.clone(), drug.id())
}

fn protein_sort_key(p: &ConformedProtein) -> (String, String, Uuid, usize, Vec<usize>) {
    (p.protein.symbol.clone(),
     p.protein.name.clone(),
     p.protein.id(),
     p.conformation.len(),
     p.conformation.clone())
}

/// Variantes de un orden base permutando solo los bloques consecutivos de
/// elementos equivalentes.
fn tie_variants(order: &[usize], same: impl Fn(usize, usize) -> bool) -> Vec<Vec<usize>> {
    let mut variants: Vec<Vec<usize>> = vec![Vec::new()];
    let mut i = 0;
    while i < order.len() {
        let mut j = i + 1;
        while j < order.len() && same(order[i], order[j]) {
            j += 1;
        }
        let block = &order[i..j];
        let block_perms = if block.len() > 1 { permutations(block) } else { vec![block.to_vec()] };
        let mut next = Vec::with_capacity(variants.len() * block_perms.len());
        for prefix in &variants {
            for perm in &block_perms {
                let mut variant = prefix.clone();
                variant.extend_from_slice(perm);
                next.push(variant);
            }
        }
        variants = next;
        i = j;
    }
    variants
}
