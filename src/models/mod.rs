pub mod cart;
pub mod error;

pub use cart::{Amount, TriggerData, UpdateItemRequest, UpdateItemResponse, UpdateOutcome, UpdateResult};
pub use error::{check_status, CartError};
