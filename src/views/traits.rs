/// Todo lo que el manejador de carrito toca en la página.
///
/// Los `set_*` devuelven `false` cuando el nodo no existe; no es un error.
pub trait CartPage {
    /// Nodo de cantidad del producto (`#qty-<id>`)
    fn set_item_quantity(&self, product_id: &str, text: &str) -> bool;

    /// Nodo de subtotal del producto (`#item-total-<id>`)
    fn set_item_total(&self, product_id: &str, text: &str) -> bool;

    /// Nodo del total del carrito (`#cart-total`)
    fn set_cart_total(&self, text: &str) -> bool;

    /// Nodo con el número de artículos (`#cart-count`)
    fn set_cart_count(&self, text: &str) -> bool;

    /// Aviso bloqueante al visitante
    fn notify(&self, message: &str);

    /// Navegar a otra ruta
    fn redirect(&self, path: &str) -> Result<(), String>;
}
