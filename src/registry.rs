use crate::{
    error::{ConversionFailure, ParseError},
    field::{Entry, Setting, Slot},
    kind::{EnvValue, Kind},
    source::{ProcessEnv, Source},
};
use std::{fs, path::Path, time::Duration};

/// First line of [`Registry::help`]
pub const HELP_HEADING: &str = "Environment variables:";

/// Metadata about a declared variable for help and documentation output
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemInfo {
    /// Environment variable key
    pub name: String,
    pub kind: Kind,
    /// Whether an unset or empty value is an error
    pub required: bool,
    /// Rendered default, `None` when it is the type's zero value
    pub default: Option<String>,
    /// Human-readable description
    pub help: String,
}

struct ConfigItem {
    name: &'static str,
    required: bool,
    help: &'static str,
    slot: Box<dyn Slot>,
    /// Raw text seen by the most recent parse
    raw: Option<String>,
}

impl ConfigItem {
    fn info(&self) -> ItemInfo {
        ItemInfo {
            name: self.name.to_string(),
            kind: self.slot.kind(),
            required: self.required,
            default: self.slot.default_text(),
            help: self.help.to_string(),
        }
    }

    /// Resolve this item against `source`, writing its destination on success
    fn resolve(&mut self, source: &impl Source) -> Result<(), ConversionFailure> {
        let raw = source.lookup(self.name).unwrap_or_default();
        let kind = self.slot.kind();
        let raw: &str = self.raw.insert(raw);

        if raw.is_empty() {
            if self.required {
                tracing::debug!(name = self.name, %kind, "required variable is unset");
                return Err(failure(self.name, kind, raw));
            }
            tracing::debug!(name = self.name, %kind, "unset, using default");
            self.slot.apply_default();
            return Ok(());
        }

        match self.slot.convert_into(raw) {
            Ok(()) => {
                tracing::debug!(name = self.name, %kind, "loaded from environment");
                Ok(())
            }
            Err(e) => {
                tracing::debug!(name = self.name, %kind, error = %e, "conversion failed");
                Err(failure(self.name, kind, raw))
            }
        }
    }
}

fn failure(name: &str, kind: Kind, raw: &str) -> ConversionFailure {
    ConversionFailure {
        name: name.to_string(),
        kind,
        raw: raw.to_string(),
    }
}

/// An ordered set of declared environment variables
///
/// Declare every variable first, then call [`parse`](Registry::parse) once to
/// read and validate all of them. Every failure is collected, so one parse
/// reports every misconfigured variable.
///
/// The registry and the [`Setting`] handles it returns are not `Send`; declare
/// and parse on one thread during startup.
///
/// # Example
/// ```rust
/// use env_loadr::Registry;
/// use std::collections::HashMap;
///
/// let mut registry = Registry::new();
/// let port = registry.int("PORT", true, 0, "bind port for server, i.e. 9090");
/// let host = registry.string("HOST", false, "localhost", "bind address");
///
/// let vars = HashMap::from([("PORT".to_string(), "9090".to_string())]);
/// registry.parse_from(&vars).unwrap();
///
/// assert_eq!(port.get(), Some(9090));
/// assert_eq!(host.get().as_deref(), Some("localhost"));
/// ```
#[derive(Default)]
pub struct Registry {
    items: Vec<ConfigItem>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Declare a variable of any supported type
    ///
    /// The returned handle is empty until [`parse`](Registry::parse) runs.
    /// Declaring the same name twice is allowed: both items are resolved and
    /// validated independently against the same raw value.
    pub fn declare<T: EnvValue>(
        &mut self,
        name: &'static str,
        required: bool,
        default: T,
        help: &'static str,
    ) -> Setting<T> {
        if self.items.iter().any(|item| item.name == name) {
            tracing::warn!(name, "environment variable declared more than once");
        }

        let setting = Setting::new(name);
        self.items.push(ConfigItem {
            name,
            required,
            help,
            slot: Box::new(Entry::new(default, setting.clone())),
            raw: None,
        });
        setting
    }

    pub fn string(
        &mut self,
        name: &'static str,
        required: bool,
        default: impl Into<String>,
        help: &'static str,
    ) -> Setting<String> {
        self.declare(name, required, default.into(), help)
    }

    pub fn int(
        &mut self,
        name: &'static str,
        required: bool,
        default: i64,
        help: &'static str,
    ) -> Setting<i64> {
        self.declare(name, required, default, help)
    }

    pub fn float(
        &mut self,
        name: &'static str,
        required: bool,
        default: f64,
        help: &'static str,
    ) -> Setting<f64> {
        self.declare(name, required, default, help)
    }

    pub fn boolean(
        &mut self,
        name: &'static str,
        required: bool,
        default: bool,
        help: &'static str,
    ) -> Setting<bool> {
        self.declare(name, required, default, help)
    }

    pub fn duration(
        &mut self,
        name: &'static str,
        required: bool,
        default: Duration,
        help: &'static str,
    ) -> Setting<Duration> {
        self.declare(name, required, default, help)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Metadata of every declared variable, in declaration order
    pub fn items(&self) -> Vec<ItemInfo> {
        self.items.iter().map(ConfigItem::info).collect()
    }

    /// Raw text read for `name` by the most recent parse
    ///
    /// Returns `None` if the name was never declared or no parse has run.
    /// Missing variables are captured as the empty string.
    pub fn raw_value(&self, name: &str) -> Option<&str> {
        self.items
            .iter()
            .rev()
            .find(|item| item.name == name)
            .and_then(|item| item.raw.as_deref())
    }

    /// Read and validate every declared variable from the process environment
    pub fn parse(&mut self) -> Result<(), ParseError> {
        self.parse_from(&ProcessEnv)
    }

    /// Read and validate every declared variable from `source`
    ///
    /// Items are processed in declaration order and a failure never stops the
    /// pass. Calling this again re-reads `source` and re-runs every conversion.
    pub fn parse_from(&mut self, source: &impl Source) -> Result<(), ParseError> {
        let failures: Vec<ConversionFailure> = self
            .items
            .iter_mut()
            .filter_map(|item| item.resolve(source).err())
            .collect();

        if failures.is_empty() {
            tracing::debug!(count = self.items.len(), "environment parsed");
            Ok(())
        } else {
            tracing::debug!(
                count = self.items.len(),
                failed = failures.len(),
                "environment parse failed"
            );
            Err(ParseError::new(failures))
        }
    }

    /// Render a help listing of every declared variable
    ///
    /// Starts with [`HELP_HEADING`], then two lines per variable: its name and
    /// default, and its indented help text. Destinations are never read, so
    /// this is safe to call before parsing.
    pub fn help(&self) -> String {
        let mut lines = Vec::with_capacity(1 + self.items.len() * 2);
        lines.push(HELP_HEADING.to_string());

        for item in &self.items {
            let default = match item.slot.default_text() {
                Some(text) => format!("'{}'", text),
                None => "no default".to_string(),
            };
            lines.push(format!("  {}  default: {}", item.name, default));
            lines.push(format!("       {}", item.help));
        }

        lines.join("\n")
    }

    /// Write configuration documentation to a markdown file
    ///
    /// # Example
    /// ```no_run
    /// use env_loadr::Registry;
    ///
    /// let mut registry = Registry::new();
    /// let _port = registry.int("PORT", false, 8080, "Server port");
    /// registry.write_docs("CONFIG.md").unwrap();
    /// ```
    pub fn write_docs(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        fs::write(path, self.docs_markdown())
    }

    fn docs_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str("## Environment Variables Summary\n\n");
        md.push_str("| Variable | Type | Required | Description | Default |\n");
        md.push_str("|----------|------|----------|-------------|---------|\n");
        for item in self.items() {
            let required_str = if item.required { "Yes" } else { "No" };
            let default_display = item.default.unwrap_or_else(|| "-".to_string());
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                item.name, item.kind, required_str, item.help, default_display
            ));
        }

        md
    }
}
