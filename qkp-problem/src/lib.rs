mod instance;
pub use instance::*;
mod pisinger;
pub use pisinger::*;
