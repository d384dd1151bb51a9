use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::utils::constants::{ANONYMOUS_USER, CSRF_COOKIE_NAME};
use crate::utils::format::CurrencyFormat;
use crate::utils::i18n::t;

/// Valores por defecto fijados en tiempo de compilación (ver build.rs)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub update_url: String,
    pub login_url: String,
    pub csrf_header: String,
    pub locale: String,
    pub currency_suffix: String,
    pub enable_logging: bool,
    pub request_timeout_ms: Option<u32>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            update_url: "/update_item/".to_string(),
            login_url: "/login/".to_string(),
            csrf_header: "X-CSRFToken".to_string(),
            locale: "vi-VN".to_string(),
            currency_suffix: " VNĐ".to_string(),
            enable_logging: true,
            request_timeout_ms: None,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            update_url: option_env!("CART_UPDATE_URL")
                .map(str::to_string)
                .unwrap_or(defaults.update_url),
            login_url: option_env!("LOGIN_URL")
                .map(str::to_string)
                .unwrap_or(defaults.login_url),
            csrf_header: option_env!("CSRF_HEADER")
                .map(str::to_string)
                .unwrap_or(defaults.csrf_header),
            locale: option_env!("CART_LOCALE")
                .map(str::to_string)
                .unwrap_or(defaults.locale),
            currency_suffix: option_env!("CART_CURRENCY_SUFFIX")
                .map(str::to_string)
                .unwrap_or(defaults.currency_suffix),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            request_timeout_ms: option_env!("REQUEST_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .filter(|ms| *ms > 0),
        }
    }

    /// Verifica si el modo de logging está habilitado
    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

/// Configuración del manejador de carrito.
///
/// Se construye una vez al enlazar los botones: desde JavaScript con
/// `init_cart_updates({ isAuthenticated, csrfToken, loginPath, ... })`,
/// o leyendo las globales de la plantilla con [`CartConfig::from_page`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CartConfig {
    pub is_authenticated: bool,
    pub csrf_token: Option<String>,
    pub login_path: String,
    pub update_url: String,
    pub csrf_header: String,
    pub locale: String,
    pub currency_suffix: String,
    /// Descarta respuestas de un producto si ya salió una petición más nueva
    pub discard_stale_responses: bool,
    pub request_timeout_ms: Option<u32>,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self::from_app_config(&CONFIG)
    }
}

impl CartConfig {
    pub fn from_app_config(app: &AppConfig) -> Self {
        Self {
            is_authenticated: false,
            csrf_token: None,
            login_path: app.login_url.clone(),
            update_url: app.update_url.clone(),
            csrf_header: app.csrf_header.clone(),
            locale: app.locale.clone(),
            currency_suffix: app.currency_suffix.clone(),
            discard_stale_responses: true,
            request_timeout_ms: app.request_timeout_ms,
        }
    }

    /// Opciones pasadas desde JavaScript; los campos ausentes toman el valor por defecto
    pub fn from_js(options: JsValue) -> Result<Self, JsValue> {
        if options.is_undefined() || options.is_null() {
            return Ok(Self::default());
        }
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsValue::from_str(&format!("Invalid cart options: {}", e)))
    }

    /// Lee las globales que define la plantilla del carrito (`user`, `csrftoken`).
    /// Si no hay `csrftoken` global se usa la cookie del mismo nombre.
    pub fn from_page() -> Self {
        let user = crate::dom::global_string("user");
        let csrf_token = crate::dom::global_string("csrftoken")
            .or_else(|| crate::dom::document_cookie().and_then(|c| cookie_value(&c, CSRF_COOKIE_NAME)));

        Self {
            is_authenticated: is_authenticated_user(user.as_deref()),
            csrf_token,
            ..Self::default()
        }
    }

    pub fn currency_format(&self) -> CurrencyFormat {
        CurrencyFormat::new(&self.locale, &self.currency_suffix)
    }

    /// Texto localizado de un aviso
    pub fn message(&self, key: &str) -> String {
        t(key, &self.locale)
    }
}

/// La plantilla expone el usuario como texto; "AnonymousUser" es el visitante sin sesión
pub fn is_authenticated_user(user: Option<&str>) -> bool {
    match user {
        Some(name) => !name.is_empty() && name != ANONYMOUS_USER,
        None => false,
    }
}

/// Buscar una cookie en `document.cookie`
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}
