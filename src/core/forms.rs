//! Client-side form validation
//!
//! Presence checks for the login and registration forms. Two independent
//! surfaces:
//!
//! - submit-time validation: blocks submission and produces alert-style
//!   notices for each missing required field
//! - inline validation: attaches an error message next to any required
//!   input without a value, cleared again when the input gains focus
//!
//! Validation never shapes the request: a passing form proceeds to the
//! native submission unmodified.

use std::collections::HashMap;

/// A required field: input name plus the label used in alert text
#[derive(Debug, Clone, Copy)]
pub struct RequiredField {
    pub name: &'static str,
    pub label: &'static str,
}

const LOGIN_FIELDS: &[RequiredField] = &[
    RequiredField {
        name: "username",
        label: "Username",
    },
    RequiredField {
        name: "password",
        label: "Password",
    },
];

const REGISTER_FIELDS: &[RequiredField] = &[
    RequiredField {
        name: "username",
        label: "Username",
    },
    RequiredField {
        name: "email",
        label: "Email",
    },
    RequiredField {
        name: "password",
        label: "Password",
    },
];

/// The two validated forms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Login,
    Register,
}

impl FormKind {
    pub fn required_fields(&self) -> &'static [RequiredField] {
        match self {
            FormKind::Login => LOGIN_FIELDS,
            FormKind::Register => REGISTER_FIELDS,
        }
    }
}

/// Result of submit-time validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitDecision {
    /// Whether the native submission may proceed
    pub proceed: bool,
    /// Alert-style notices, one per missing required field
    pub alerts: Vec<String>,
}

/// Validate a form submission. A required field that is absent or blank
/// after trimming blocks submission (default action cancelled) and adds
/// an alert notice; otherwise the submission proceeds untouched.
pub fn validate_submit(kind: FormKind, values: &HashMap<String, String>) -> SubmitDecision {
    let mut alerts = Vec::new();

    for field in kind.required_fields() {
        let blank = values
            .get(field.name)
            .map(|v| v.trim().is_empty())
            .unwrap_or(true);
        if blank {
            alerts.push(format!("{} is required.", field.label));
        }
    }

    SubmitDecision {
        proceed: alerts.is_empty(),
        alerts,
    }
}

/// One rendered input, as seen by the inline validator
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub placeholder: String,
    pub value: String,
    pub required: bool,
}

impl FormField {
    pub fn required(name: &str, placeholder: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            placeholder: placeholder.to_string(),
            value: value.to_string(),
            required: true,
        }
    }
}

/// The secondary, independent validator: inline error text per input
#[derive(Debug, Default)]
pub struct InlineValidator {
    errors: HashMap<String, String>,
}

impl InlineValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate all inputs, attaching "<placeholder> is required" next to
    /// each empty required one and clearing messages for filled ones.
    /// Returns whether the form is valid.
    pub fn validate(&mut self, fields: &[FormField]) -> bool {
        let mut valid = true;

        for field in fields {
            if field.required && field.value.trim().is_empty() {
                valid = false;
                self.errors.insert(
                    field.name.clone(),
                    format!("{} is required", field.placeholder),
                );
            } else {
                self.errors.remove(&field.name);
            }
        }

        valid
    }

    /// Clear the inline error when an input gains focus
    pub fn focus(&mut self, name: &str) {
        self.errors.remove(name);
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
