// ============================================================================
// EVENT HANDLING - Registro de listeners
// ============================================================================
// Los listeners sobre botones usan closure.forget(): cuando el elemento sale del
// DOM el navegador libera el listener. El listener de DOMContentLoaded se
// registra una única vez desde el entry point.
// ============================================================================

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, MouseEvent};

use super::element::document;

/// Helper para crear click handler simple
pub fn on_click<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(MouseEvent)>);
    element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Ejecutar `handler` cuando el documento esté listo.
/// Si el DOM ya se cargó (script con defer o carga tardía del WASM) se ejecuta de inmediato.
pub fn on_document_ready<F>(handler: F) -> Result<(), JsValue>
where
    F: FnOnce() + 'static,
{
    let doc = document().ok_or_else(|| JsValue::from_str("No document"))?;

    if doc.ready_state() != "loading" {
        handler();
        return Ok(());
    }

    let closure = Closure::once(move |_e: Event| handler());
    doc.add_event_listener_with_callback("DOMContentLoaded", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
