use crate::dom;
use crate::utils::constants::{item_total_node_id, quantity_node_id, CART_COUNT_ID, CART_TOTAL_ID};

use super::CartPage;

/// Página del carrito en el navegador
#[derive(Debug, Clone, Copy, Default)]
pub struct WebCartPage;

impl WebCartPage {
    pub fn new() -> Self {
        Self
    }
}

impl CartPage for WebCartPage {
    fn set_item_quantity(&self, product_id: &str, text: &str) -> bool {
        dom::set_text_by_id(&quantity_node_id(product_id), text)
    }

    fn set_item_total(&self, product_id: &str, text: &str) -> bool {
        dom::set_text_by_id(&item_total_node_id(product_id), text)
    }

    fn set_cart_total(&self, text: &str) -> bool {
        dom::set_text_by_id(CART_TOTAL_ID, text)
    }

    fn set_cart_count(&self, text: &str) -> bool {
        dom::set_text_by_id(CART_COUNT_ID, text)
    }

    fn notify(&self, message: &str) {
        dom::alert(message);
    }

    fn redirect(&self, path: &str) -> Result<(), String> {
        dom::redirect(path).map_err(|e| format!("{:?}", e))
    }
}
