mod config_errors;
mod storage_errors;

pub use config_errors::*;
pub use storage_errors::*;
