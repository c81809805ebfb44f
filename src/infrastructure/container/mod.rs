//! Container module

mod construct;
pub mod injector;
mod stats;

pub use injector::{Injector, InjectorOptions, DEFAULT_INJECTOR_NAME};
pub use stats::ContainerStats;
