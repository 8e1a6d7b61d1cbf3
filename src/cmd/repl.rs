use crate::arithmetic::ArithmeticParser;
use crate::repl::Repl;
use crate::settings::Settings;
use clap::Args;

#[derive(Args, Debug)]
#[clap(about = "Start the REPL")]
pub struct Opts {}

pub fn execute(_opts: &Opts, engine: ArithmeticParser, settings: Settings) -> anyhow::Result<()> {
    let mut repl = Repl::new(engine, settings);
    repl.run()
}
