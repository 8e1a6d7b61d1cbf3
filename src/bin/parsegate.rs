use clap::Parser;
use parsegate::cmd;
use std::process;

fn main() {
    pretty_env_logger::init();
    let opts = cmd::Opts::parse();

    match cmd::execute(&opts) {
        Ok(true) => (),
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(2);
        }
    }
}
