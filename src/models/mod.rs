pub mod artifact;
pub mod config;
pub mod job;

pub use artifact::*;
pub use config::*;
pub use job::*;
