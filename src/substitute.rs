// Compose-style variable interpolation used when this crate plays the host.

use std::collections::HashMap;
use std::sync::LazyLock;

use anyhow::{Result, bail};
use regex::{Captures, Regex};

static VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\$(?:(?P<escaped>\$)|\{(?P<braced>[A-Za-z_][A-Za-z0-9_]*)(?:(?P<op>:?-)(?P<default>[^}]*))?\}|(?P<named>[A-Za-z_][A-Za-z0-9_]*))",
    )
    .expect("variable pattern is valid")
});

/// Expands `${VAR}`, `${VAR:-default}`, `${VAR-default}`, `$VAR` and `$$`
/// against a fixed variable set. Unknown variables expand to nothing.
#[derive(Debug, Clone, Default)]
pub struct Substitutor {
    vars: HashMap<String, String>,
}

impl Substitutor {
    pub fn new(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }

    /// Variables from the process environment.
    pub fn from_env() -> Self {
        Self::new(std::env::vars().collect())
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Apply a `KEY=VALUE` override.
    pub fn set_pair(&mut self, pair: &str) -> Result<()> {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("expected KEY=VALUE, got `{pair}`");
        };
        if key.is_empty() {
            bail!("variable name cannot be blank in `{pair}`");
        }
        self.set(key, value);
        Ok(())
    }

    pub fn apply(&self, raw: &str) -> String {
        VARIABLE
            .replace_all(raw, |caps: &Captures| self.expand(caps))
            .into_owned()
    }

    fn expand(&self, caps: &Captures) -> String {
        if caps.name("escaped").is_some() {
            return "$".to_string();
        }
        if let Some(name) = caps.name("named") {
            return self.vars.get(name.as_str()).cloned().unwrap_or_default();
        }

        let name = caps.name("braced").map(|m| m.as_str()).unwrap_or_default();
        let value = self.vars.get(name);
        let default = caps.name("default").map(|m| m.as_str()).unwrap_or_default();
        match (caps.name("op").map(|m| m.as_str()), value) {
            (Some(":-"), Some(v)) if v.is_empty() => default.to_string(),
            (Some(_), None) => default.to_string(),
            (_, Some(v)) => v.clone(),
            (None, None) => String::new(),
        }
    }
}
