pub mod client;
pub mod config;
pub mod recipes;
pub mod selection;

pub use client::*;
pub use config::*;
pub use recipes::*;
pub use selection::*;
