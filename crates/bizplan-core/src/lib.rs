pub mod banner;
pub mod catalog;
pub mod config;
pub mod envelope;
pub mod error;
pub mod evaluation;
pub mod io;
pub mod paths;
pub mod project;
pub mod promotion;
pub mod registration;
pub mod storage;
pub mod types;
pub mod wizard;

pub use error::{BizplanError, Result};
