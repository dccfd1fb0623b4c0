pub mod create_device;
pub mod deploy;
pub mod init;
pub mod logs;
pub mod status;
pub mod train;
pub mod wait;

pub use create_device::*;
pub use deploy::*;
pub use init::*;
pub use logs::*;
pub use status::*;
pub use train::*;
pub use wait::*;
