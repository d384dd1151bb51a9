// ============================================================================
// VIEWMODELS - Estado + lógica de UI
// ============================================================================

pub mod cart_viewmodel;

pub use cart_viewmodel::CartViewModel;
