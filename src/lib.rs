#![no_std]

extern crate alloc;

#[macro_use]
pub(crate) mod macros;

pub(crate) mod any;
pub(crate) mod callable;
pub(crate) mod config;
pub(crate) mod container;
pub(crate) mod errors;
pub(crate) mod params;
pub(crate) mod registry;
pub(crate) mod resolver;
pub(crate) mod service;
pub(crate) mod signature;

pub mod utils;

pub use any::{TypeInfo, Value};
pub use callable::{Callable, Constructible};
pub use config::Config;
pub use container::Container;
pub use errors::{InstantiateErrorKind, InstantiatorErrorKind, InvokeErrorKind, ResolveErrorKind};
pub use params::{Arg, Args, Params};
pub use signature::Signature;
