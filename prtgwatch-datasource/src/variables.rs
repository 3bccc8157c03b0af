//! Bound dashboard template variables and placeholder substitution.

use std::collections::BTreeMap;

/// Current value(s) of one dashboard variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableValue {
    /// A single bound value.
    Single(String),
    /// A multi-select binding.
    Multi(Vec<String>),
}

impl VariableValue {
    /// Render the value in the server's substitution syntax.
    ///
    /// Multi-valued bindings render as a `{a,b}` list, the form the API's
    /// filter parameters accept for alternatives.
    pub fn render(&self) -> String {
        match self {
            VariableValue::Single(value) => value.clone(),
            VariableValue::Multi(values) => format!("{{{}}}", values.join(",")),
        }
    }
}

impl From<&str> for VariableValue {
    fn from(value: &str) -> Self {
        VariableValue::Single(value.to_string())
    }
}

impl From<String> for VariableValue {
    fn from(value: String) -> Self {
        VariableValue::Single(value)
    }
}

/// The set of dashboard variables currently in scope, name to value(s).
///
/// Owned by the caller and passed in per request batch; the engine never
/// mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundVariables {
    vars: BTreeMap<String, VariableValue>,
}

impl BoundVariables {
    /// Create an empty variable set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a variable.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<VariableValue>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Fluent variant of [`set`](Self::set).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<VariableValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Bind a multi-select variable.
    pub fn with_multi(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.vars.insert(
            name.into(),
            VariableValue::Multi(values.into_iter().map(Into::into).collect()),
        );
        self
    }

    /// Look up a variable by name (without the `$` marker).
    pub fn get(&self, name: &str) -> Option<&VariableValue> {
        self.vars.get(name)
    }

    /// Check if no variables are bound.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Replace every `$name` occurrence in `text` with the bound value.
    ///
    /// Names are substituted longest-first so `$host` never clobbers the
    /// prefix of `$hostname`. Unbound placeholders are left in place; raw
    /// queries go to the server verbatim either way.
    pub fn substitute(&self, text: &str) -> String {
        let mut names: Vec<&String> = self.vars.keys().collect();
        names.sort_by_key(|name| std::cmp::Reverse(name.len()));

        let mut out = text.to_string();
        for name in names {
            let placeholder = format!("${name}");
            if out.contains(&placeholder) {
                out = out.replace(&placeholder, &self.vars[name].render());
            }
        }
        out
    }
}
