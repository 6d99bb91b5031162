//! Command line tooling for inspecting CAIP-25 authorization requests and the permissions built
//! from them.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod cmd;
pub mod handler;
pub mod opts;
pub mod utils;
