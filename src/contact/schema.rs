//! Contact form schema - one constraint table, shared by every validation pass

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A field of the contact form
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
    Budget,
    Timeline,
}

impl Field {
    /// Form order
    pub const ALL: [Field; 6] = [
        Field::Name,
        Field::Email,
        Field::Subject,
        Field::Budget,
        Field::Timeline,
        Field::Message,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Subject => "subject",
            Field::Message => "message",
            Field::Budget => "budget",
            Field::Timeline => "timeline",
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Field::Name => "Full Name *",
            Field::Email => "Email Address *",
            Field::Subject => "Subject *",
            Field::Message => "Message *",
            Field::Budget => "Budget (optional)",
            Field::Timeline => "Timeline (optional)",
        }
    }

    /// Fields chosen from a fixed list rather than typed
    pub fn is_choice(&self) -> bool {
        matches!(self, Field::Budget | Field::Timeline)
    }

    pub fn next(&self) -> Field {
        let idx = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Field {
        let idx = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Field name to human-readable problem
pub type FieldErrors = BTreeMap<Field, String>;

pub const BUDGET_OPTIONS: [&str; 5] = [
    "Under $1,000",
    "$1,000 – $5,000",
    "$5,000 – $15,000",
    "$15,000+",
    "Let's discuss",
];

pub const TIMELINE_OPTIONS: [&str; 5] = [
    "ASAP",
    "Within a month",
    "1 – 3 months",
    "3 – 6 months",
    "Flexible",
];

/// What a field must satisfy
#[derive(Debug)]
pub enum Constraint {
    Length {
        min: usize,
        max: usize,
        too_short: &'static str,
        too_long: &'static str,
    },
    Email {
        invalid: &'static str,
    },
    OneOf {
        options: &'static [&'static str],
        invalid: &'static str,
    },
}

#[derive(Debug)]
pub struct FieldRule {
    pub field: Field,
    pub required: bool,
    pub constraint: Constraint,
}

pub const RULES: &[FieldRule] = &[
    FieldRule {
        field: Field::Name,
        required: true,
        constraint: Constraint::Length {
            min: 2,
            max: 60,
            too_short: "Name must be at least 2 characters",
            too_long: "Name must be at most 60 characters",
        },
    },
    FieldRule {
        field: Field::Email,
        required: true,
        constraint: Constraint::Email {
            invalid: "Please enter a valid email address",
        },
    },
    FieldRule {
        field: Field::Subject,
        required: true,
        constraint: Constraint::Length {
            min: 5,
            max: 120,
            too_short: "Must be at least 5 characters",
            too_long: "Must be at most 120 characters",
        },
    },
    FieldRule {
        field: Field::Message,
        required: true,
        constraint: Constraint::Length {
            min: 20,
            max: 2000,
            too_short: "Message must be at least 20 characters",
            too_long: "Message must be at most 2000 characters",
        },
    },
    FieldRule {
        field: Field::Budget,
        required: false,
        constraint: Constraint::OneOf {
            options: &BUDGET_OPTIONS,
            invalid: "Please choose a listed budget",
        },
    },
    FieldRule {
        field: Field::Timeline,
        required: false,
        constraint: Constraint::OneOf {
            options: &TIMELINE_OPTIONS,
            invalid: "Please choose a listed timeline",
        },
    },
];

impl Constraint {
    /// Returns the message for the first rule the value breaks
    pub fn check(&self, value: &str) -> Option<&'static str> {
        match self {
            Constraint::Length { min, max, too_short, too_long } => {
                let len = value.chars().count();
                if len < *min {
                    Some(*too_short)
                } else if len > *max {
                    Some(*too_long)
                } else {
                    None
                }
            }
            Constraint::Email { invalid } => {
                if is_valid_email(value) {
                    None
                } else {
                    Some(*invalid)
                }
            }
            Constraint::OneOf { options, invalid } => {
                if options.contains(&value) {
                    None
                } else {
                    Some(*invalid)
                }
            }
        }
    }
}

fn is_valid_email(value: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_'+\-.]+@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$").unwrap()
    });

    let local = value.split('@').next().unwrap_or("");
    re.is_match(value) && !local.starts_with('.') && !local.ends_with('.') && !local.contains("..")
}

/// Raw form input, exactly as typed
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub timeline: Option<String>,
}

impl ContactDraft {
    pub fn value(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => Some(&self.name),
            Field::Email => Some(&self.email),
            Field::Subject => Some(&self.subject),
            Field::Message => Some(&self.message),
            Field::Budget => self.budget.as_deref(),
            Field::Timeline => self.timeline.as_deref(),
        }
    }

    /// Mutable text of a typed field; choice fields have none
    pub fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Name => Some(&mut self.name),
            Field::Email => Some(&mut self.email),
            Field::Subject => Some(&mut self.subject),
            Field::Message => Some(&mut self.message),
            Field::Budget | Field::Timeline => None,
        }
    }

    /// Step a choice field through `unset -> option 1 -> ... -> option n -> unset`
    pub fn cycle_choice(&mut self, field: Field) {
        let (slot, options): (&mut Option<String>, &[&str]) = match field {
            Field::Budget => (&mut self.budget, &BUDGET_OPTIONS[..]),
            Field::Timeline => (&mut self.timeline, &TIMELINE_OPTIONS[..]),
            _ => return,
        };

        let next = match slot.as_deref() {
            None => options.first(),
            Some(current) => options
                .iter()
                .position(|o| *o == current)
                .and_then(|i| options.get(i + 1)),
        };
        *slot = next.map(|s| s.to_string());
    }
}

/// A draft that passed validation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
}

/// Check every field of `draft` against `RULES`. All failures are reported,
/// one message per field.
pub fn validate(draft: &ContactDraft) -> Result<ContactSubmission, FieldErrors> {
    let mut errors = FieldErrors::new();

    for rule in RULES {
        // Blank optional fields count as absent
        let value = draft.value(rule.field).filter(|v| rule.required || !v.trim().is_empty());
        if let Some(message) = value.and_then(|v| rule.constraint.check(v)) {
            errors.insert(rule.field, message.to_string());
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let optional = |v: &Option<String>| v.as_ref().filter(|s| !s.trim().is_empty()).cloned();

    Ok(ContactSubmission {
        name: draft.name.clone(),
        email: draft.email.clone(),
        subject: draft.subject.clone(),
        message: draft.message.clone(),
        budget: optional(&draft.budget),
        timeline: optional(&draft.timeline),
    })
}
