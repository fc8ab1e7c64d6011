pub mod cli;
pub mod commands;
pub mod config;
pub mod diagnostics;
pub mod highlight;
pub mod language;
pub mod sexp;
pub mod tree;
pub mod utils;
pub mod view;
