use serde::{Deserialize, Serialize};

use super::error::CartError;

/// Valor de `status` con el que el servidor indica que la línea se eliminó
pub const STATUS_DELETED: &str = "deleted";

/// Campos leídos del botón (`data-product`, `data-action`).
/// Un atributo ausente queda en `None` y así viaja al servidor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerData {
    pub product_id: Option<String>,
    pub action: Option<String>,
}

#[cfg(test)]
impl TriggerData {
    pub fn new(product_id: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            product_id: Some(product_id.into()),
            action: Some(action.into()),
        }
    }
}

/// Body del POST de actualización
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateItemRequest {
    #[serde(rename = "productId", skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl From<&TriggerData> for UpdateItemRequest {
    fn from(trigger: &TriggerData) -> Self {
        Self {
            product_id: trigger.product_id.clone(),
            action: trigger.action.clone(),
        }
    }
}

impl UpdateItemRequest {
    pub fn to_json(&self) -> Result<String, CartError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Importe monetario tal como llega del servidor: número, o cadena cuando el
/// backend serializa decimales como texto.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

/// Respuesta del endpoint de actualización (todos los campos son opcionales).
/// Las cantidades son números JSON cualesquiera (`3` o `3.0`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UpdateItemResponse {
    pub status: Option<String>,
    pub quantity: Option<f64>,
    pub cart_total: Option<Amount>,
    pub total_price: Option<Amount>,
    pub item_total: Option<Amount>,
    pub total_quantity: Option<f64>,
}

/// Resultado listo para pintar en la página
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateResult {
    /// Identificador del botón pulsado; es la clave de los nodos por producto
    pub product_id: Option<String>,
    pub quantity: Option<f64>,
    pub cart_total: Option<Amount>,
    pub item_total: Option<Amount>,
    pub total_quantity: Option<f64>,
}

impl UpdateResult {
    pub fn from_response(product_id: Option<String>, response: UpdateItemResponse) -> Self {
        let deleted = response.status.as_deref() == Some(STATUS_DELETED);
        let quantity = match response.quantity {
            Some(quantity) => Some(quantity),
            None if deleted => Some(0.0),
            None => None,
        };

        Self {
            product_id,
            quantity,
            cart_total: response.cart_total.or(response.total_price),
            item_total: response.item_total,
            total_quantity: response.total_quantity,
        }
    }

    /// Parsear el body de una respuesta 2xx
    pub fn parse(product_id: Option<String>, body: &str) -> Result<Self, CartError> {
        let response: UpdateItemResponse = serde_json::from_str(body)?;
        Ok(Self::from_response(product_id, response))
    }
}

/// Resultado de un click. Lo consume un único manejador
/// (`CartViewModel::apply_outcome`).
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    Success(UpdateResult),
    Failure(CartError),
    /// Llegó una respuesta más nueva para el mismo producto; esta se descarta
    Superseded,
}

impl From<Result<UpdateResult, CartError>> for UpdateOutcome {
    fn from(result: Result<UpdateResult, CartError>) -> Self {
        match result {
            Ok(update) => UpdateOutcome::Success(update),
            Err(e) => UpdateOutcome::Failure(e),
        }
    }
}
