//! URL pattern compilation
//!
//! Patterns are `/`-separated segments where `*` matches anything (including
//! an origin such as `http://localhost:5173`) and `:name` captures exactly one
//! path segment. `*/api/products/:id` compiles to
//! `^.*/api/products/(?P<id>[^/]+)/?$`. Captured segments are
//! percent-decoded before they are handed out.

use std::collections::HashMap;

use regex::Regex;
use thiserror::Error;

/// Error raised while compiling a route pattern
#[derive(Error, Debug)]
pub enum PatternError {
    /// A `:` segment without a usable name
    #[error("Invalid placeholder {segment:?} in pattern {pattern:?}")]
    InvalidPlaceholder { pattern: String, segment: String },

    /// The same placeholder appears twice
    #[error("Duplicate placeholder :{name} in pattern {pattern:?}")]
    DuplicatePlaceholder { pattern: String, name: String },

    /// The generated expression did not compile
    #[error("Pattern regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// Placeholder values captured from a matched path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(HashMap<String, String>);

impl PathParams {
    /// Value bound to `:name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

/// A compiled route pattern
#[derive(Debug, Clone)]
pub struct RoutePattern {
    source: String,
    regex: Regex,
    placeholders: Vec<String>,
}

impl RoutePattern {
    /// Compile `pattern`
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        let mut placeholders: Vec<String> = Vec::new();
        let mut segments = Vec::new();

        for segment in pattern.split('/') {
            let piece = if segment == "*" {
                ".*".to_string()
            } else if let Some(name) = segment.strip_prefix(':') {
                let valid = !name.is_empty()
                    && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
                if !valid {
                    return Err(PatternError::InvalidPlaceholder {
                        pattern: pattern.to_string(),
                        segment: segment.to_string(),
                    });
                }
                if placeholders.iter().any(|existing| existing == name) {
                    return Err(PatternError::DuplicatePlaceholder {
                        pattern: pattern.to_string(),
                        name: name.to_string(),
                    });
                }
                placeholders.push(name.to_string());
                format!("(?P<{name}>[^/]+)")
            } else {
                regex::escape(segment)
            };
            segments.push(piece);
        }

        let regex = Regex::new(&format!("^{}/?$", segments.join("/")))?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
            placeholders,
        })
    }

    /// The pattern as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Match a path (no query string) and bind its placeholders
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let captures = self.regex.captures(path)?;

        let params = self
            .placeholders
            .iter()
            .filter_map(|name| {
                captures
                    .name(name)
                    .map(|value| (name.clone(), decode_segment(value.as_str())))
            })
            .collect();

        Some(PathParams(params))
    }
}

/// Percent-decode a captured segment; undecodable input is kept as sent
fn decode_segment(raw: &str) -> String {
    urlencoding::decode(raw).map_or_else(|_| raw.to_string(), |decoded| decoded.into_owned())
}
