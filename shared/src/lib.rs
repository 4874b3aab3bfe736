pub mod catalog;
pub mod config;
pub mod types;
pub mod utils;

pub use self::catalog::*;
// `config` 同时也是外部 crate 名，需要显式指向本地模块
pub use self::config::*;
pub use self::types::*;
pub use self::utils::*;
