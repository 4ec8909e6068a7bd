//! Core Kronos types and structures

pub mod enums;
pub mod structs;
pub mod flags;
pub mod compute;
pub mod thread_safety;

pub use enums::*;
pub use structs::*;
pub use flags::*;
pub use compute::*;

use crate::sys::*;