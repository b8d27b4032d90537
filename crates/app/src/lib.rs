//! Splitdeck - command-line client for the Split Admin API.
//!
//! The binary parses arguments, initialises logging and hands over to
//! [`runner::run`], which wires the infrastructure adapters into the
//! store actions and prints the fetched collections.

pub mod cli;
pub mod logging;
pub mod output;
pub mod runner;

pub use cli::{Cli, Command};
pub use runner::{ExitStatus, run};
