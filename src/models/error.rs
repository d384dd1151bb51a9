use thiserror::Error;

/// Errores de una actualización de carrito.
///
/// Para el visitante solo existen dos tipos: [`CartError::Unauthenticated`]
/// (visitante sin sesión al pulsar; aviso + redirección al login) y el resto,
/// que se muestra con un único aviso genérico. Las variantes internas
/// conservan la causa para los logs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CartError {
    #[error("visitor is not authenticated")]
    Unauthenticated,

    #[error("HTTP {status}")]
    Http { status: u16 },

    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out after {0} ms")]
    Timeout(u32),

    #[error("parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for CartError {
    fn from(e: serde_json::Error) -> Self {
        CartError::Parse(e.to_string())
    }
}

/// Clasifica el status HTTP de la respuesta.
///
/// Cualquier 2xx es éxito; todo lo demás (401 incluido) es un fallo sin
/// distinción. La sesión solo se comprueba antes de enviar.
pub fn check_status(status: u16) -> Result<(), CartError> {
    match status {
        200..=299 => Ok(()),
        _ => Err(CartError::Http { status }),
    }
}
