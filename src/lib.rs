//! rserb: render embedded-code templates with context from YAML files and
//! `--name=value` command-line assignments.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
