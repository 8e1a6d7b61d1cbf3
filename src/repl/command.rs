use crate::settings::{Setting, Settings};
use anyhow::anyhow;

/// What the REPL should do with a line after command dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Not a command, parse it.
    Source,
    Handled,
    Quit,
}

pub struct Commands;

impl Commands {
    pub fn new() -> Self {
        Self {}
    }

    pub fn dispatch(&self, input: &str, settings: &mut Settings) -> anyhow::Result<Dispatch> {
        let parts: Vec<&str> = input.split_whitespace().collect();

        if let Some(true) = parts.first().map(|e| e.starts_with(':')) {
            match &parts[..] {
                [":help"] => self.handle_help(),
                [":set", argument] => self.handle_set(argument, settings)?,
                [":settings"] => println!("Settings+> {}", self.settings_summary(settings)),
                [":quit"] | [":q"] => return Ok(Dispatch::Quit),
                _ => return Err(anyhow!("Invalid command")),
            }
            Ok(Dispatch::Handled)
        } else {
            Ok(Dispatch::Source)
        }
    }

    fn handle_help(&self) {
        println!("Available commands: ");
        self.display_help(":help", "Show help on the available commands");
        self.display_help(":set (+|-)setting", "Enable or disable a setting");
        self.display_help(":settings", "Show the values of all settings");
        self.display_help(":quit", "Leave the REPL");
        println!("Anything else is parsed as an arithmetic expression.");
    }

    fn handle_set(&self, argument: &str, settings: &mut Settings) -> anyhow::Result<()> {
        if let Some(name) = argument.strip_prefix('+') {
            settings.enable(name.parse::<Setting>()?);
            Ok(())
        } else if let Some(name) = argument.strip_prefix('-') {
            settings.disable(name.parse::<Setting>()?);
            Ok(())
        } else {
            Err(anyhow!(
                "Setting must be a known setting and prefixed with either + or -"
            ))
        }
    }

    pub fn settings_summary(&self, settings: &Settings) -> String {
        settings
            .as_vec()
            .iter()
            .map(|(s, f)| format!("{}: {}", s, if *f { "enabled" } else { "disabled" }))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[inline]
    fn display_help(&self, usage: &str, description: &str) {
        println!("{:<25} {}", usage, description);
    }
}

impl Default for Commands {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_lines_pass_through() {
        let mut settings = Settings::default();
        let commands = Commands::new();

        assert_eq!(
            commands.dispatch("1 + 2", &mut settings).unwrap(),
            Dispatch::Source
        );
    }

    #[test]
    fn test_set_toggles_settings() {
        let mut settings = Settings::default();
        let commands = Commands::new();

        assert_eq!(
            commands.dispatch("  :set +debug", &mut settings).unwrap(),
            Dispatch::Handled
        );
        assert_eq!(
            commands.dispatch(":set -color", &mut settings).unwrap(),
            Dispatch::Handled
        );

        assert!(settings.is_enabled(&Setting::Debug));
        assert!(!settings.is_enabled(&Setting::Color));
        assert_eq!(
            commands.settings_summary(&settings),
            "color: disabled debug: enabled"
        );
    }

    #[test]
    fn test_invalid_commands() {
        let mut settings = Settings::default();
        let commands = Commands::new();

        assert!(commands.dispatch(":set debug", &mut settings).is_err());
        assert!(commands.dispatch(":set +verbose", &mut settings).is_err());
        assert!(commands.dispatch(":frobnicate", &mut settings).is_err());
    }

    #[test]
    fn test_quit() {
        let mut settings = Settings::default();
        let commands = Commands::new();

        assert_eq!(commands.dispatch(":q", &mut settings).unwrap(), Dispatch::Quit);
        assert_eq!(
            commands.dispatch(":quit", &mut settings).unwrap(),
            Dispatch::Quit
        );
    }
}
