// Utils compartidos

pub mod constants;
pub mod cookies;
pub mod format;
pub mod storage;

pub use constants::*;
pub use cookies::*;
pub use format::*;
pub use storage::*;
