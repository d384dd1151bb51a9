/// Selector de los botones de cantidad
pub const TRIGGER_SELECTOR: &str = ".update-cart";

/// Atributo con el que se marcan los botones ya enlazados
pub const BOUND_MARKER_ATTR: &str = "data-cart-bound";

/// Nodo con el total del carrito
pub const CART_TOTAL_ID: &str = "cart-total";

/// Nodo con el número total de artículos
pub const CART_COUNT_ID: &str = "cart-count";

/// Valor de la global `user` para visitantes sin sesión
pub const ANONYMOUS_USER: &str = "AnonymousUser";

/// Cookie donde el backend deja el token CSRF
pub const CSRF_COOKIE_NAME: &str = "csrftoken";

/// Nodo de cantidad por producto (`qty-<id>`)
pub fn quantity_node_id(product_id: &str) -> String {
    format!("qty-{}", product_id)
}

/// Nodo de subtotal por producto (`item-total-<id>`)
pub fn item_total_node_id(product_id: &str) -> String {
    format!("item-total-{}", product_id)
}
