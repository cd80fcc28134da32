pub mod config;
pub mod dispatch;
pub mod error;
pub mod io;
pub mod menu;
pub mod model;
pub mod plan;
pub mod resolve;

pub use error::{Result, ToolError};
