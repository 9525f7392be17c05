//! Constantes del motor de generación.

/// Versión lógica del motor. Entra en los fingerprints de red para que un
/// cambio incompatible del motor invalide comparaciones entre versiones.
pub const ENGINE_VERSION: &str = "B1.0";

/// Techo de barridos por defecto: única válvula de seguridad frente a la
/// no terminación (p. ej. oligomerización desbocada). Superarlo es un fallo
/// blando: la red se devuelve igualmente, marcada como posiblemente
/// incompleta.
pub const DEFAULT_SWEEP_LIMIT: usize = 20;
