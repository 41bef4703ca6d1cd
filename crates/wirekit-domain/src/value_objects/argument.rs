//! Service argument tokens
//!
//! Arguments in a service descriptor are plain JSON values. Strings may carry a
//! sigil that turns them into a reference:
//!
//! | Precedence | Form | Token |
//! |------------|------|-------|
//! | 1 | `@` + `[A-Za-z/_-]+` (prefix) | [`ArgumentToken::ServiceRef`] |
//! | 2 | `%` + `[A-Za-z_.-]+` + `%` (whole string) | [`ArgumentToken::ParameterRef`] |
//! | 3 | `!` + `[A-Za-z_/.-]+` (prefix) | [`ArgumentToken::ExternalRef`] |
//! | 4 | anything else | [`ArgumentToken::Literal`] |
//!
//! The first matching row wins. Non-string values are always literals.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::fmt;

/// Sigil kinds recognized by the argument grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sigil {
    /// `@service/id`
    Service,
    /// `%parameter.name%`
    Parameter,
    /// `!external-module`
    External,
}

impl Sigil {
    fn token(self, name: &str) -> ArgumentToken {
        match self {
            Self::Service => ArgumentToken::ServiceRef(name.to_owned()),
            Self::Parameter => ArgumentToken::ParameterRef(name.to_owned()),
            Self::External => ArgumentToken::ExternalRef(name.to_owned()),
        }
    }
}

/// Precedence table, checked top to bottom
static GRAMMAR: Lazy<[(Sigil, Regex); 3]> = Lazy::new(|| {
    [
        (Sigil::Service, compile(r"^@([a-zA-Z/_-]+)")),
        (Sigil::Parameter, compile(r"^%([a-zA-Z_.-]+)%$")),
        (Sigil::External, compile(r"^!([a-zA-Z_/.-]+)")),
    ]
});

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("argument grammar patterns are valid")
}

/// A classified service argument
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentToken {
    /// Reference to another service, resolved lazily by the container
    ServiceRef(String),
    /// Reference to a flattened parameter, checked at bootstrap
    ParameterRef(String),
    /// Reference to an external module, loaded at bootstrap
    ExternalRef(String),
    /// Injected as-is
    Literal(Value),
}

impl ArgumentToken {
    /// Classify a raw argument value
    ///
    /// Classification is total: every value yields a token.
    pub fn classify(raw: &Value) -> Self {
        match raw {
            Value::String(text) => Self::classify_str(text),
            other => Self::Literal(other.clone()),
        }
    }

    /// Classify a raw string argument
    pub fn classify_str(text: &str) -> Self {
        GRAMMAR
            .iter()
            .find_map(|(sigil, pattern)| {
                pattern
                    .captures(text)
                    .and_then(|captures| captures.get(1))
                    .map(|name| sigil.token(name.as_str()))
            })
            .unwrap_or_else(|| Self::Literal(Value::String(text.to_owned())))
    }

    /// Sigil of a reference token, `None` for literals
    pub fn sigil(&self) -> Option<Sigil> {
        match self {
            Self::ServiceRef(_) => Some(Sigil::Service),
            Self::ParameterRef(_) => Some(Sigil::Parameter),
            Self::ExternalRef(_) => Some(Sigil::External),
            Self::Literal(_) => None,
        }
    }

    /// Parsed object when this is a string literal holding a JSON object
    ///
    /// Such literals are additionally bound in the container under their own text.
    pub fn json_object_literal(&self) -> Option<(&str, Map<String, Value>)> {
        let Self::Literal(Value::String(text)) = self else {
            return None;
        };
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(object)) => Some((text.as_str(), object)),
            _ => None,
        }
    }
}

impl fmt::Display for ArgumentToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ServiceRef(id) => write!(f, "@{id}"),
            Self::ParameterRef(name) => write!(f, "%{name}%"),
            Self::ExternalRef(name) => write!(f, "!{name}"),
            Self::Literal(value) => write!(f, "{value}"),
        }
    }
}
