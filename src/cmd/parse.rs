use crate::arithmetic::ArithmeticParser;
use crate::cmd::render_tree;
use crate::facade::ParseFacade;
use crate::reporting::ErrorReporter;
use crate::settings::Settings;
use anyhow::Context;
use clap::Args;
use std::io::Read;

#[derive(Args, Debug)]
#[clap(about = "Parse the file specified by <input>, or stdin when it is `-`")]
pub struct Opts {
    pub input: String,
}

pub fn execute(opts: &Opts, engine: &ArithmeticParser, settings: &Settings) -> anyhow::Result<bool> {
    let source = read_input(&opts.input)?;
    let facade = ParseFacade::new(engine, ErrorReporter::factory(source_name(&opts.input), settings));

    match facade.parse(&source) {
        Some(tree) => {
            println!("{}", render_tree(&tree, settings));
            Ok(true)
        }
        None => Ok(false),
    }
}

fn source_name(input: &str) -> &str {
    if input == "-" {
        "<stdin>"
    } else {
        input
    }
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("failed to read {}", input))
    }
}
