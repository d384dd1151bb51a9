// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio: envía el cambio de cantidad y devuelve el body
// ============================================================================

use std::future::Future;

use futures::future::{self, Either};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;

use crate::config::CartConfig;
use crate::models::{check_status, CartError, UpdateItemRequest};

/// Transporte del cambio de cantidad.
///
/// `post_update` devuelve el body de una respuesta 2xx. Un status distinto se
/// devuelve como error sin leer el body.
#[allow(async_fn_in_trait)]
pub trait CartTransport {
    async fn post_update(&self, request: &UpdateItemRequest) -> Result<String, CartError>;
}

/// Cliente HTTP del endpoint de carrito
#[derive(Debug, Clone)]
pub struct ApiClient {
    update_url: String,
    csrf_header: String,
    csrf_token: Option<String>,
    timeout_ms: Option<u32>,
}

impl ApiClient {
    pub fn new(config: &CartConfig) -> Self {
        Self {
            update_url: config.update_url.clone(),
            csrf_header: config.csrf_header.clone(),
            csrf_token: config.csrf_token.clone(),
            timeout_ms: config.request_timeout_ms,
        }
    }

    /// Construir el POST: Content-Type JSON, cabecera CSRF si hay token y body
    pub fn build_request(&self, request: &UpdateItemRequest) -> Result<Request, CartError> {
        let mut builder = Request::post(&self.update_url).header("Content-Type", "application/json");
        match &self.csrf_token {
            Some(token) => builder = builder.header(&self.csrf_header, token),
            None => log::warn!("⚠️ Petición de carrito sin token CSRF"),
        }

        builder
            .body(request.to_json()?)
            .map_err(|e| CartError::Network(format!("Request build error: {}", e)))
    }

    async fn send(&self, request: &UpdateItemRequest) -> Result<String, CartError> {
        let response = self
            .build_request(request)?
            .send()
            .await
            .map_err(|e| CartError::Network(e.to_string()))?;

        check_status(response.status())?;

        response
            .text()
            .await
            .map_err(|e| CartError::Parse(e.to_string()))
    }
}

/// Limitar una petición a `timeout_ms`. La petición no se aborta: su resultado
/// simplemente se ignora al vencer el plazo.
pub async fn with_timeout<F>(request: F, timeout_ms: Option<u32>) -> Result<String, CartError>
where
    F: Future<Output = Result<String, CartError>>,
{
    let Some(ms) = timeout_ms else {
        return request.await;
    };

    match future::select(Box::pin(request), TimeoutFuture::new(ms)).await {
        Either::Left((result, _)) => result,
        Either::Right(_) => Err(CartError::Timeout(ms)),
    }
}

impl CartTransport for ApiClient {
    async fn post_update(&self, request: &UpdateItemRequest) -> Result<String, CartError> {
        log::debug!("📤 POST {} {:?}", self.update_url, request);
        with_timeout(self.send(request), self.timeout_ms).await
    }
}
