//! Loader implementation: platform adapter, scanner, dispatch tables, ICD
//! registry, layer chain builder, debug-callback registry, and the public
//! entry points built on top of them.

pub mod config;
pub mod debug;
pub mod device;
pub mod dispatch;
pub mod error;
pub mod instance;
pub mod layers;
pub mod platform;
pub mod registry;
pub mod scanner;

pub use device::*;
pub use instance::*;
