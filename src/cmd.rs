pub mod parse;
pub mod repl;
use crate::arithmetic::{ArithmeticParser, Expr, DEFAULT_MAX_DEPTH};
use crate::settings::{Setting, Settings};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Parse arithmetic expressions and report syntax errors against the source"
)]
pub struct Opts {
    /// Never color diagnostics
    #[clap(long)]
    pub no_color: bool,

    /// Print syntax trees with positions
    #[clap(long)]
    pub debug: bool,

    /// How deeply parentheses and negations may nest
    #[clap(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Parse(parse::Opts),
    Repl(repl::Opts),
}

impl Opts {
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::default();

        settings.set(Setting::Color, !self.no_color);
        settings.set(Setting::Debug, self.debug);
        settings
    }
}

/// Runs the selected command. `Ok(false)` means the input did not parse.
pub fn execute(opts: &Opts) -> anyhow::Result<bool> {
    let settings = opts.settings();
    let engine = ArithmeticParser::with_max_depth(opts.max_depth);

    log::debug!("settings: {:?}", settings.as_vec());

    match &opts.command {
        Command::Parse(parse_opts) => parse::execute(parse_opts, &engine, &settings),
        Command::Repl(repl_opts) => repl::execute(repl_opts, engine, settings).map(|_| true),
    }
}

pub fn render_tree(tree: &Expr, settings: &Settings) -> String {
    if settings.is_enabled(&Setting::Debug) {
        format!("{:#?}", tree)
    } else {
        tree.to_string()
    }
}
