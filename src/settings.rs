use rustc_hash::FxHashMap;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Settings {
    inner: FxHashMap<Setting, bool>,
}

impl Settings {
    pub fn new() -> Self {
        Self {
            inner: FxHashMap::default(),
        }
    }

    pub fn enable(&mut self, setting: Setting) {
        self.inner.insert(setting, true);
    }

    pub fn disable(&mut self, setting: Setting) {
        self.inner.insert(setting, false);
    }

    pub fn set(&mut self, setting: Setting, enabled: bool) {
        self.inner.insert(setting, enabled);
    }

    pub fn is_enabled(&self, setting: &Setting) -> bool {
        match self.inner.get(setting) {
            Some(v) => *v,
            _ => false,
        }
    }

    /// All settings, sorted by name so listings are stable.
    pub fn as_vec(&self) -> Vec<(Setting, bool)> {
        let mut all = self
            .inner
            .iter()
            .map(|p| (p.0.clone(), *p.1))
            .collect::<Vec<_>>();

        all.sort_by_key(|(setting, _)| setting.to_string());
        all
    }
}

impl Default for Settings {
    fn default() -> Settings {
        let mut settings = Settings::new();

        settings.enable(Setting::Color);
        settings.disable(Setting::Debug);

        settings
    }
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum Setting {
    /// Colored diagnostics on stderr.
    Color,
    /// Print syntax trees with their positions instead of the compact form.
    Debug,
}

impl std::fmt::Display for Setting {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        let name = match self {
            Setting::Color => "color",
            Setting::Debug => "debug",
        };

        fmt.write_str(name)
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("Unknown setting {0}")]
pub struct UnknownSetting(pub String);

impl FromStr for Setting {
    type Err = UnknownSetting;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_lowercase().as_str() {
            "color" => Ok(Setting::Color),
            "debug" => Ok(Setting::Debug),
            other => Err(UnknownSetting(other.to_string())),
        }
    }
}
