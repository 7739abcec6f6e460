pub mod config;
pub mod dictionary;
pub mod error;
pub mod mt;

pub use config::Config;
pub use dictionary::{LanguageMap, Rewriter, RunSummary};
pub use error::{Error, Result};
