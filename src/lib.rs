// ============================================================================
// CART UPDATER - BOTONES DE CANTIDAD DEL CARRITO (RUST + WASM)
// ============================================================================
// Arquitectura MVVM:
// - Views: escriben nodos de la página (trait CartPage)
// - ViewModels: guardia de sesión + petición + resultado
// - Services: SOLO comunicación API
// - State: peticiones en vuelo por producto
// - Models: payloads compartidos con el backend
// ============================================================================

pub mod app;
pub mod config;
pub mod dom;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;
pub mod views;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::app::App;
use crate::config::{CartConfig, CONFIG};
use crate::models::TriggerData;

// App vigente; los listeners la consultan en cada click
thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let level = if CONFIG.is_logging_enabled() {
        log::Level::Debug
    } else {
        log::Level::Warn
    };
    wasm_logger::init(wasm_logger::Config::new(level));
    log::info!("🛒 Cart updater cargado");

    // Sin init_cart_updates() explícito se usan las globales de la plantilla
    dom::on_document_ready(|| {
        ensure_configured();
        if let Err(e) = app::bind_update_buttons() {
            log::error!("❌ Error enlazando botones: {:?}", e);
        }
    })
}

/// Configurar el carrito desde JavaScript:
/// `init_cart_updates({ isAuthenticated, csrfToken, loginPath })`
#[wasm_bindgen]
pub fn init_cart_updates(options: JsValue) -> Result<(), JsValue> {
    let config = CartConfig::from_js(options)?;
    install(App::new(config));

    dom::on_document_ready(|| {
        if let Err(e) = app::bind_update_buttons() {
            log::error!("❌ Error enlazando botones: {:?}", e);
        }
    })
}

/// Enlazar botones añadidos después de la carga (devuelve cuántos)
#[wasm_bindgen]
pub fn rebind_cart_buttons() -> Result<usize, JsValue> {
    app::bind_update_buttons()
}

/// Configuración vigente. Si nadie llamó a `init_cart_updates()` se crea la
/// App con las globales de la plantilla; una App ya instalada no se reemplaza.
pub fn ensure_configured() -> CartConfig {
    APP.with(|cell| {
        cell.borrow_mut()
            .get_or_insert_with(|| App::new(CartConfig::from_page()))
            .viewmodel()
            .config()
            .clone()
    })
}

fn install(app: App) {
    APP.with(|cell| {
        *cell.borrow_mut() = Some(app);
    });
}

/// Entregar un click a la App vigente
pub(crate) fn dispatch_trigger(trigger: TriggerData) {
    let app = APP.with(|cell| cell.borrow().clone());
    match app {
        Some(app) => app.dispatch(trigger),
        None => log::warn!("⚠️ Click en carrito sin App inicializada"),
    }
}
