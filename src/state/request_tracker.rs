// ============================================================================
// REQUEST TRACKER - Última petición en vuelo por producto
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// Ticket de una petición. Solo el ticket más nuevo de cada producto es vigente.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    key: String,
    generation: u64,
}

impl RequestTicket {
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Generación vigente por producto.
/// Las entradas se borran al terminar la petición vigente.
#[derive(Clone, Default)]
pub struct RequestTracker {
    next_generation: Rc<Cell<u64>>,
    latest: Rc<RefCell<HashMap<String, u64>>>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registrar una nueva petición; invalida las anteriores del mismo producto
    pub fn begin(&self, key: &str) -> RequestTicket {
        let generation = self.next_generation.get() + 1;
        self.next_generation.set(generation);
        self.latest.borrow_mut().insert(key.to_string(), generation);
        RequestTicket {
            key: key.to_string(),
            generation,
        }
    }

    /// ¿Sigue siendo la petición más nueva de su producto?
    #[cfg(test)]
    pub(crate) fn is_current(&self, ticket: &RequestTicket) -> bool {
        self.latest.borrow().get(&ticket.key) == Some(&ticket.generation)
    }

    /// Cerrar la petición. Devuelve si era la vigente.
    pub fn finish(&self, ticket: &RequestTicket) -> bool {
        let mut latest = self.latest.borrow_mut();
        if latest.get(&ticket.key) == Some(&ticket.generation) {
            latest.remove(&ticket.key);
            true
        } else {
            false
        }
    }

    /// Peticiones vigentes (una como máximo por producto)
    #[cfg(test)]
    pub(crate) fn in_flight(&self) -> usize {
        self.latest.borrow().len()
    }
}
