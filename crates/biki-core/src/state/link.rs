//! Enlaces internos de un complejo.
//!
//! Un extremo de enlace es un índice de componente suelto (`Leaf`) o un
//! grupo anidado de extremos (`Group`): un subensamblaje rígido ya enlazado
//! que se trata como un único punto de anclaje. Las operaciones "traducir
//! índices bajo un mapa", "recoger índices constituyentes" y "comparar
//! estructuralmente" son recorridos explícitos sobre este árbol.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LinkEndpoint {
    Leaf(usize),
    Group(Vec<LinkEndpoint>),
}

impl LinkEndpoint {
    /// Un extremo a partir de índices ya anclados: un índice suelto queda en
    /// `Leaf`, varios forman un `Group`.
    pub fn from_indices(indices: &[usize]) -> LinkEndpoint {
        if indices.len() == 1 {
            LinkEndpoint::Leaf(indices[0])
        } else {
            LinkEndpoint::Group(indices.iter().map(|&i| LinkEndpoint::Leaf(i)).collect())
        }
    }

    /// Índices de componente alcanzables desde este extremo.
    pub fn leaf_indices(&self) -> Vec<usize> {
        match self {
            LinkEndpoint::Leaf(i) => vec![*i],
            LinkEndpoint::Group(parts) => parts.iter().flat_map(LinkEndpoint::leaf_indices).collect(),
        }
    }

    /// Traduce cada hoja bajo un mapa índice-viejo → índice-nuevo.
    pub fn translate(&self, map: &[usize]) -> LinkEndpoint {
        match self {
            LinkEndpoint::Leaf(i) => LinkEndpoint::Leaf(map[*i]),
            LinkEndpoint::Group(parts) => {
                LinkEndpoint::Group(parts.iter().map(|p| p.translate(map)).collect())
            }
        }
    }

    pub fn contains_index(&self, index: usize) -> bool {
        match self {
            LinkEndpoint::Leaf(i) => *i == index,
            LinkEndpoint::Group(parts) => parts.iter().any(|p| p.contains_index(index)),
        }
    }
}

/// Un enlace interno: par no ordenado de extremos. Se guarda normalizado
/// (extremo menor primero) para que la igualdad derivada cubra las dos
/// orientaciones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Link {
    first: LinkEndpoint,
    second: LinkEndpoint,
}

impl Link {
    pub fn new(a: LinkEndpoint, b: LinkEndpoint) -> Link {
        if a <= b {
            Link { first: a, second: b }
        } else {
            Link { first: b, second: a }
        }
    }

    pub fn endpoints(&self) -> (&LinkEndpoint, &LinkEndpoint) {
        (&self.first, &self.second)
    }

    pub fn leaf_indices(&self) -> Vec<usize> {
        let mut indices = self.first.leaf_indices();
        indices.extend(self.second.leaf_indices());
        indices
    }

    pub fn translate(&self, map: &[usize]) -> Link {
        Link::new(self.first.translate(map), self.second.translate(map))
    }

    /// ¿Une este enlace los índices `i` y `j` (en cualquier orientación)?
    pub fn joins(&self, i: usize, j: usize) -> bool {
        (self.first.contains_index(i) && self.second.contains_index(j))
        || (self.first.contains_index(j) && self.second.contains_index(i))
    }
}
