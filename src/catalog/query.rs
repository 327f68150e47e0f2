//! Builder for ServiceNow encoded queries (`sysparm_query`).
//!
//! An encoded query is a list of conditions joined by `^` (AND). A single
//! condition may itself contain `^OR` to express a disjunction, as in
//! `titleLIKEnet^ORdescriptionLIKEnet`.

/// Accumulates conditions for a `sysparm_query` parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedQuery {
    conditions: Vec<String>,
}

impl EncodedQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// `field=value`
    pub fn equals(mut self, field: &str, value: impl AsRef<str>) -> Self {
        self.conditions.push(format!("{}={}", field, value.as_ref()));
        self
    }

    /// `field=value`, only when `value` is present.
    pub fn equals_opt(self, field: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.equals(field, value),
            None => self,
        }
    }

    /// `fieldLIKEterm` for the first field, `^ORfieldLIKEterm` for the rest.
    /// Skipped when `term` is absent or `fields` is empty.
    pub fn like_any(mut self, fields: &[&str], term: Option<&str>) -> Self {
        if let Some(term) = term {
            let disjunction = fields
                .iter()
                .map(|field| format!("{}LIKE{}", field, term))
                .collect::<Vec<_>>()
                .join("^OR");
            if !disjunction.is_empty() {
                self.conditions.push(disjunction);
            }
        }
        self
    }

    /// Adds `active=true` when `active` is set.
    pub fn active_only(self, active: bool) -> Self {
        if active {
            self.equals("active", "true")
        } else {
            self
        }
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// The encoded query, or `None` when no condition was added.
    pub fn build(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self.conditions.join("^"))
        }
    }
}
