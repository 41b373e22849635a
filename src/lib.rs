#![doc = include_str!("../README.md")]
#![warn(missing_docs, missing_debug_implementations)]
mod bookkeeping;
mod concurrent;
mod config;
mod diagnostic;
mod host;
mod id;
mod outcome;
mod spawnable;
mod thread_local;

pub use concurrent::*;
pub use config::*;
pub use diagnostic::*;
pub use host::*;
pub use id::*;
pub use outcome::*;
pub use spawnable::*;
pub use thread_local::*;
