//! Computed values with a user override

use serde::Serialize;

use super::{format_signed, parse_int};

/// A computed value that the user may replace with their own text
///
/// Every stat row (saving throws, skills, attacks, passive perception,
/// initiative) resolves its final value through [`Derived::effective`], for
/// both display and rolling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Derived<T> {
    /// Value produced by the rules
    pub computed: T,
    /// Raw override text; `None` when the field is blank
    #[serde(rename = "override", skip_serializing_if = "Option::is_none")]
    pub override_value: Option<String>,
}

impl<T> Derived<T> {
    /// Wrap a computed value with the raw override field (blank = no override)
    pub fn new(computed: T, override_value: &str) -> Self {
        let override_value = if override_value.is_empty() {
            None
        } else {
            Some(override_value.to_string())
        };
        Self {
            computed,
            override_value,
        }
    }

    /// Whether the user replaced the computed value
    pub fn is_overridden(&self) -> bool {
        self.override_value.is_some()
    }
}

impl Derived<i32> {
    /// The value used for display and rolling
    ///
    /// An override that does not parse as an integer falls back to the
    /// computed value.
    pub fn effective(&self) -> i32 {
        self.override_value
            .as_deref()
            .and_then(parse_int)
            .unwrap_or(self.computed)
    }

    /// Text shown in the row: the override verbatim, or the signed computed value
    pub fn display(&self) -> String {
        match &self.override_value {
            Some(text) => text.clone(),
            None => format_signed(self.computed),
        }
    }
}
