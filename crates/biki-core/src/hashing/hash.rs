//! Helper de hash: abstrae el algoritmo para no tocar el resto del motor si
//! cambia.

use blake3::Hasher;

/// Hashea un string y devuelve hex.
pub fn hash_str(input: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(input.as_bytes());
    hasher.finalize().to_hex().to_string()
}

/// Hashea un valor JSON tras canonicalizarlo.
pub fn hash_value(value: &serde_json::Value) -> String {
    hash_str(&super::to_canonical_json(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn hash_value_ignores_object_key_order() {
        let a = json!({"states": ["s1"], "engine": "B1.0"});
        let b = json!({"engine": "B1.0", "states": ["s1"]});
        assert_eq!(hash_value(&a), hash_value(&b));
        assert_ne!(hash_value(&a), hash_value(&json!({"engine": "B1.0", "states": []})));
    }
}
