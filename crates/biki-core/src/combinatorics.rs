//! Helpers combinatorios del motor: subconjuntos, combinaciones,
//! permutaciones y producto cartesiano con índices distintos. Todo opera
//! sobre índices de componentes, que en la práctica son pocos por estado.

/// Subconjuntos propios y no vacíos de `0..n` (para cortes de disociación).
pub(crate) fn proper_nonempty_subsets(n: usize) -> Vec<Vec<usize>> {
    let mut subsets = Vec::new();
    if n < 2 {
        return subsets;
    }
    // máscaras 1..2^n - 2: excluye el vacío y el total
    for mask in 1..((1usize << n) - 1) {
        let subset: Vec<usize> = (0..n).filter(|i| mask & (1 << i) != 0).collect();
        subsets.push(subset);
    }
    subsets
}

/// Combinaciones de tamaño `k` sobre `0..n`, en orden lexicográfico.
pub(crate) fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    let mut all = Vec::new();
    if k > n {
        return all;
    }
    let mut current = Vec::with_capacity(k);
    fn recurse(start: usize, n: usize, k: usize, current: &mut Vec<usize>, all: &mut Vec<Vec<usize>>) {
        if current.len() == k {
            all.push(current.clone());
            return;
        }
        for i in start..n {
            current.push(i);
            recurse(i + 1, n, k, current, all);
            current.pop();
        }
    }
    recurse(0, n, k, &mut current, &mut all);
    all
}

/// Todas las permutaciones de los elementos dados.
pub(crate) fn permutations(items: &[usize]) -> Vec<Vec<usize>> {
    if items.is_empty() {
        return vec![Vec::new()];
    }
    let mut all = Vec::new();
    for (i, &item) in items.iter().enumerate() {
        let mut rest: Vec<usize> = items.to_vec();
        rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, item);
            all.push(tail);
        }
    }
    all
}

/// Producto cartesiano de listas de posiciones candidatas, descartando las
/// combinaciones que repiten posición (un componente no puede ocupar dos
/// slots de la misma regla a la vez).
pub(crate) fn distinct_product(choices: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let mut all = Vec::new();
    let mut current = Vec::with_capacity(choices.len());
    fn recurse(choices: &[Vec<usize>], current: &mut Vec<usize>, all: &mut Vec<Vec<usize>>) {
        if current.len() == choices.len() {
            all.push(current.clone());
            return;
        }
        for &candidate in &choices[current.len()] {
            if current.contains(&candidate) {
                continue;
            }
            current.push(candidate);
            recurse(choices, current, all);
            current.pop();
        }
    }
    recurse(choices, &mut current, &mut all);
    all
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subsets_exclude_empty_and_full() {
        let subsets = proper_nonempty_subsets(3);
        assert_eq!(subsets.len(), 6);
        assert!(!subsets.iter().any(|s| s.is_empty() || s.len() == 3));
    }

    #[test]
    fn combinations_of_two() {
        assert_eq!(combinations(3, 2), vec![vec![0, 1], vec![0, 2], vec![1, 2]]);
    }

    #[test]
    fn permutations_count() {
        assert_eq!(permutations(&[4, 7, 9]).len(), 6);
    }

    #[test]
    fn distinct_product_skips_repeats() {
        let combos = distinct_product(&[vec![0, 1], vec![0, 1]]);
        assert_eq!(combos, vec![vec![0, 1], vec![1, 0]]);
    }
}
