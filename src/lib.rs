extern crate thiserror;

extern crate nom;
extern crate nom_locate;

pub mod arithmetic;
pub mod cmd;
pub mod facade;
pub mod grammar;
pub mod repl;
pub mod reporting;
pub mod settings;

pub use facade::{Failure, ParseFacade, ParseFailure, ParserEngine, UNKNOWN_POSITION};
pub use grammar::{normalize, GrammarContext, Matched};
pub use reporting::{ErrorReporter, Reporter, ReporterFactory};

pub const PARSEGATE_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn parsegate_config_directory() -> Option<std::path::PathBuf> {
    directories::ProjectDirs::from("org", "parsegate", "parsegate")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

#[cfg(test)]
#[macro_use]
extern crate matches;

#[cfg(test)]
extern crate quickcheck;

#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;
