//! Context parameter mechanism.
//!
//! Stack parameters arrive as flat key/value pairs, merged from two sources:
//!
//! - an optional JSON context file (`ministack.json` by convention, with a
//!   top-level `"context"` object),
//! - repeated `-c key=value` command-line overrides, which win over the file.
//!
//! The context is untyped; interpretation (parsing, clamping, defaulting)
//! happens in [`crate::config`].

use crate::error::{Error, Result};
use indexmap::IndexMap;
use std::path::Path;

/// Flat, ordered key/value parameter map.
#[derive(Debug, Clone, Default)]
pub struct Context {
    values: IndexMap<String, String>,
}

impl Context {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads context values from a JSON file with a top-level `"context"`
    /// object, matching the layout of `ministack.json`:
    ///
    /// ```json
    /// { "context": { "region": "eu-west-1", "maxAzs": "3" } }
    /// ```
    ///
    /// Non-string JSON values (numbers, booleans) are accepted and coerced
    /// to their string form.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| Error::ContextFileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let doc: serde_json::Value =
            serde_json::from_str(&raw).map_err(|e| Error::ContextFileParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let mut ctx = Self::new();
        let Some(section) = doc.get("context") else {
            return Ok(ctx);
        };
        let Some(map) = section.as_object() else {
            return Err(Error::ContextFileParse {
                path: path.to_path_buf(),
                message: "'context' must be a JSON object".to_string(),
            });
        };
        for (key, value) in map {
            let value = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            ctx.set(key, value);
        }
        Ok(ctx)
    }

    /// Applies `key=value` overrides on top of the current values.
    /// The value may itself contain `=` (only the first one splits).
    pub fn apply_overrides<I, S>(&mut self, overrides: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for item in overrides {
            let item = item.as_ref();
            let Some((key, value)) = item.split_once('=') else {
                return Err(Error::InvalidOverride(item.to_string()));
            };
            if key.is_empty() {
                return Err(Error::InvalidOverride(item.to_string()));
            }
            self.set(key, value);
        }
        Ok(())
    }

    /// Sets a single value, replacing any existing one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Looks up a value by key. Whitespace-only values count as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no values are stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Context
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut ctx = Self::new();
        for (k, v) in iter {
            ctx.set(k, v);
        }
        ctx
    }
}
