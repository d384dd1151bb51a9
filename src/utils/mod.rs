// Utils compartidos

pub mod constants;
pub mod format;
pub mod i18n;

pub use constants::*;
pub use format::CurrencyFormat;
pub use i18n::t;
