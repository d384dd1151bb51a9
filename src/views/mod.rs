// Vista del carrito: trait común + implementación sobre el DOM

pub mod traits;
pub mod web;

pub use traits::CartPage;
pub use web::WebCartPage;
