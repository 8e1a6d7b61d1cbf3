pub mod command;
use crate::arithmetic::ArithmeticParser;
use crate::cmd::render_tree;
use crate::facade::ParseFacade;
use crate::parsegate_config_directory;
use crate::reporting::ErrorReporter;
use crate::settings::Settings;
use crate::PARSEGATE_VERSION;
use command::{Commands, Dispatch};
use rustyline::error::ReadlineError;
use rustyline::Editor;
use std::path::PathBuf;

pub struct Repl {
    engine: ArithmeticParser,
    settings: Settings,
    commands: Commands,
    editor: Editor<()>,
}

impl Repl {
    pub fn new(engine: ArithmeticParser, settings: Settings) -> Self {
        let mut editor = Editor::<()>::new();

        if let Some(path) = Self::history_path() {
            if editor.load_history(&path).is_err() {
                log::debug!("no previous history at {}", path.display());
            }
        }

        Self {
            engine,
            settings,
            commands: Commands::new(),
            editor,
        }
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        println!("parsegate {} (type :help for commands)\n", PARSEGATE_VERSION);

        loop {
            match self.editor.readline("parse> ") {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => {
                    self.editor.add_history_entry(line.as_str());

                    match self.commands.dispatch(&line, &mut self.settings) {
                        Ok(Dispatch::Source) => self.parse_line(&line),
                        Ok(Dispatch::Handled) => (),
                        Ok(Dispatch::Quit) => break,
                        Err(e) => eprintln!("{}", e),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }

        self.save_history()
    }

    fn parse_line(&self, line: &str) {
        let facade = ParseFacade::new(&self.engine, ErrorReporter::factory("repl", &self.settings));

        if let Some(tree) = facade.parse(line) {
            println!("{}", render_tree(&tree, &self.settings));
        }
    }

    fn save_history(&mut self) -> anyhow::Result<()> {
        if let Some(path) = Self::history_path() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            self.editor.save_history(&path)?;
        }

        Ok(())
    }

    fn history_path() -> Option<PathBuf> {
        parsegate_config_directory().map(|dir| dir.join("repl").join("history.txt"))
    }
}
