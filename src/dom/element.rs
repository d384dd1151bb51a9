// ============================================================================
// ELEMENT HELPERS - Funciones básicas para leer/escribir el DOM
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlDocument, HtmlElement, Window};

/// Obtener window global
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Obtener document
pub fn document() -> Option<Document> {
    window()?.document()
}

/// Obtener elemento por ID
pub fn get_element_by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

/// Establecer text content
pub fn set_text_content(element: &Element, text: &str) {
    element.set_text_content(Some(text));
}

/// Escribir texto en el elemento con ese ID. Devuelve false si no existe.
pub fn set_text_by_id(id: &str, text: &str) -> bool {
    match get_element_by_id(id) {
        Some(element) => {
            set_text_content(&element, text);
            true
        }
        None => false,
    }
}

/// Establecer atributo
pub fn set_attribute(element: &Element, name: &str, value: &str) -> Result<(), JsValue> {
    element.set_attribute(name, value)
}

/// Verificar si tiene atributo
pub fn has_attribute(element: &Element, name: &str) -> bool {
    element.has_attribute(name)
}

/// Leer `data-<key>` (clave en camelCase, como en `element.dataset`)
pub fn get_data(element: &Element, key: &str) -> Option<String> {
    element
        .dyn_ref::<HtmlElement>()
        .and_then(|html| html.dataset().get(key))
}

/// Query selector all (buscar múltiples elementos por selector CSS)
pub fn query_selector_all(selector: &str) -> Result<Vec<Element>, JsValue> {
    let nodes = document()
        .ok_or_else(|| JsValue::from_str("No document"))?
        .query_selector_all(selector)?;

    let mut elements = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        if let Some(element) = nodes.item(i).and_then(|node| node.dyn_into::<Element>().ok()) {
            elements.push(element);
        }
    }
    Ok(elements)
}

/// Variable global de la página como texto (`window[name]`)
pub fn global_string(name: &str) -> Option<String> {
    let win = window()?;
    js_sys::Reflect::get(&win, &JsValue::from_str(name))
        .ok()
        .and_then(|value| value.as_string())
}

/// Contenido de `document.cookie`
pub fn document_cookie() -> Option<String> {
    document()?
        .dyn_into::<HtmlDocument>()
        .ok()?
        .cookie()
        .ok()
}

/// Aviso bloqueante (`window.alert`)
pub fn alert(message: &str) {
    if let Some(win) = window() {
        if let Err(e) = win.alert_with_message(message) {
            log::warn!("⚠️ alert falló: {:?}", e);
        }
    }
}

/// Navegar a otra ruta (`window.location.href = path`)
pub fn redirect(path: &str) -> Result<(), JsValue> {
    window()
        .ok_or_else(|| JsValue::from_str("No window"))?
        .location()
        .set_href(path)
}
