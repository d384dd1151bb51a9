// ============================================================================
// APP - Enlace de los botones de cantidad con el ViewModel
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Element, MouseEvent};

use crate::config::CartConfig;
use crate::dom::{get_data, has_attribute, on_click, query_selector_all, set_attribute};
use crate::models::TriggerData;
use crate::services::ApiClient;
use crate::utils::constants::{BOUND_MARKER_ATTR, TRIGGER_SELECTOR};
use crate::viewmodels::CartViewModel;
use crate::views::WebCartPage;

pub type WebCartViewModel = CartViewModel<ApiClient, WebCartPage>;

/// Aplicación de la página del carrito
#[derive(Clone)]
pub struct App {
    viewmodel: Rc<WebCartViewModel>,
}

impl App {
    pub fn new(config: CartConfig) -> Self {
        log::info!(
            "👤 Carrito configurado (autenticado: {}, token CSRF: {})",
            config.is_authenticated,
            if config.csrf_token.is_some() { "sí" } else { "no" }
        );
        let transport = ApiClient::new(&config);
        Self {
            viewmodel: Rc::new(CartViewModel::new(config, transport, WebCartPage::new())),
        }
    }

    pub fn viewmodel(&self) -> Rc<WebCartViewModel> {
        self.viewmodel.clone()
    }

    /// Lanzar la actualización de un botón en segundo plano
    pub fn dispatch(&self, trigger: TriggerData) {
        let viewmodel = self.viewmodel();
        wasm_bindgen_futures::spawn_local(async move {
            viewmodel.handle_trigger(&trigger).await;
        });
    }
}

/// Enlazar los botones `.update-cart` que aún no tienen listener.
/// Cada click busca la App vigente, así una nueva configuración aplica
/// también a botones enlazados antes.
pub fn bind_update_buttons() -> Result<usize, JsValue> {
    let mut bound = 0;

    for element in query_selector_all(TRIGGER_SELECTOR)? {
        if has_attribute(&element, BOUND_MARKER_ATTR) {
            continue;
        }
        set_attribute(&element, BOUND_MARKER_ATTR, "1")?;

        let target = element.clone();
        on_click(&element, move |e: MouseEvent| {
            e.prevent_default();
            crate::dispatch_trigger(read_trigger(&target));
        })?;
        bound += 1;
    }

    log::info!("🔗 {} botones de carrito enlazados", bound);
    Ok(bound)
}

/// `data-product` y `data-action` del botón
pub fn read_trigger(element: &Element) -> TriggerData {
    TriggerData {
        product_id: get_data(element, "product"),
        action: get_data(element, "action"),
    }
}
