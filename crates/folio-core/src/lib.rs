pub mod config;
pub mod error;
pub mod locale;
pub mod safety;

pub use config::FolioConfig;
pub use error::{FolioError, Result};
pub use locale::{Locale, LocalizedStrings};
pub use safety::{InputGuard, MAX_INPUT_CHARS};
