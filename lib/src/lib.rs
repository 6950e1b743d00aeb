#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::correctness)]
#![warn(rust_2018_idioms)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

pub mod config;
pub mod entry;
pub mod filter;
pub mod input;
pub mod output;
pub mod pipeline;
pub mod resolver;
pub mod utils;

pub use pipeline::{run, RunReport};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[macro_use]
extern crate log;
