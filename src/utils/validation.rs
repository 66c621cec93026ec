//! The employee validation schema.
//!
//! Rules are declared once in [`EMPLOYEE_SCHEMA`] and evaluated for one of two
//! tiers. The server tier is authoritative. The client tier is published to
//! the browser form and may only drop rules, never add them, so it can never
//! reject a payload the server would accept.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use validator::{ValidationError, ValidationErrors};

use crate::models::employee::NewEmployee;

static EMPLOYEE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}[A-Z]{2}[0-9]{1,6}$").expect("valid employee id regex"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("valid phone regex"));
static EMAIL_DOMAIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$").expect("valid email domain regex")
});

/// Pseudo-field used for violations that concern the request body as a whole.
pub const BODY_FIELD: &str = "body";
/// Pseudo-field used for violations in the query string.
pub const QUERY_FIELD: &str = "query";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Client,
    Server,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Rule {
    NonEmpty,
    MaxChars { max: usize },
    Pattern {
        #[serde(serialize_with = "pattern_source")]
        pattern: &'static Lazy<Regex>,
    },
    Email,
    ValidDate,
    /// Passes on unparseable input; parsing is [`Rule::ValidDate`]'s job.
    NotFuture,
}

fn pattern_source<S: Serializer>(
    pattern: &&'static Lazy<Regex>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(pattern.as_str())
}

impl Rule {
    pub fn code(&self) -> &'static str {
        match self {
            Rule::NonEmpty => "non_empty",
            Rule::MaxChars { .. } => "max_chars",
            Rule::Pattern { .. } => "pattern",
            Rule::Email => "email",
            Rule::ValidDate => "valid_date",
            Rule::NotFuture => "not_future",
        }
    }

    pub fn check(&self, value: &str, now: DateTime<Utc>) -> bool {
        match self {
            Rule::NonEmpty => !value.is_empty(),
            Rule::MaxChars { max } => value.chars().count() <= *max,
            Rule::Pattern { pattern } => pattern.is_match(value),
            Rule::Email => validator::validate_email(value) && has_dotted_domain(value),
            Rule::ValidDate => JoiningDate::parse(value).is_some(),
            Rule::NotFuture => JoiningDate::parse(value).map_or(true, |date| !date.is_after(now)),
        }
    }
}

/// Bare hosts and address literals pass `validate_email` but are not mailable
/// domains for our purposes.
fn has_dotted_domain(email: &str) -> bool {
    email
        .rsplit_once('@')
        .map_or(false, |(_, domain)| EMAIL_DOMAIN_RE.is_match(domain))
}

#[derive(Debug, Serialize)]
pub struct RuleSpec {
    #[serde(flatten)]
    pub rule: Rule,
    pub message: &'static str,
    #[serde(skip)]
    pub server_only: bool,
}

impl RuleSpec {
    const fn both(rule: Rule, message: &'static str) -> Self {
        RuleSpec { rule, message, server_only: false }
    }

    const fn server(rule: Rule, message: &'static str) -> Self {
        RuleSpec { rule, message, server_only: true }
    }

    pub fn applies_to(&self, tier: Tier) -> bool {
        tier == Tier::Server || !self.server_only
    }
}

#[derive(Debug)]
pub struct FieldSpec {
    /// Wire name of the field.
    pub name: &'static str,
    pub rules: &'static [RuleSpec],
    /// Choices offered by the form. Advisory only; never enforced.
    pub choices: &'static [&'static str],
}

pub static EMPLOYEE_SCHEMA: [FieldSpec; 7] = [
    FieldSpec {
        name: "employeeId",
        rules: &[
            RuleSpec::both(Rule::NonEmpty, "EmployeeId must not be empty"),
            RuleSpec::both(Rule::MaxChars { max: 10 }, "Max 10 characters"),
            RuleSpec::both(Rule::Pattern { pattern: &EMPLOYEE_ID_RE }, "Invalid EmployeeId format"),
        ],
        choices: &[],
    },
    FieldSpec {
        name: "name",
        rules: &[RuleSpec::both(Rule::NonEmpty, "Name is required")],
        choices: &[],
    },
    FieldSpec {
        name: "email",
        rules: &[RuleSpec::both(Rule::Email, "Invalid email format")],
        choices: &[],
    },
    FieldSpec {
        name: "phone",
        rules: &[RuleSpec::both(Rule::Pattern { pattern: &PHONE_RE }, "Phone number must be 10 digits")],
        choices: &[],
    },
    FieldSpec {
        name: "department",
        rules: &[RuleSpec::both(Rule::NonEmpty, "Department is required")],
        choices: &["HR", "Engineering", "Marketing"],
    },
    FieldSpec {
        name: "dateOfJoining",
        rules: &[
            // The form's date picker only emits valid dates.
            RuleSpec::server(Rule::ValidDate, "Date of joining must be a valid date"),
            RuleSpec::both(Rule::NotFuture, "Date of joining cannot be a future date"),
        ],
        choices: &[],
    },
    FieldSpec {
        name: "role",
        rules: &[RuleSpec::both(Rule::NonEmpty, "Role is required")],
        choices: &[],
    },
];

/// A joining date as submitted: either a calendar day or an exact instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoiningDate {
    Day(NaiveDate),
    Instant(DateTime<Utc>),
}

impl JoiningDate {
    pub fn parse(value: &str) -> Option<Self> {
        if let Ok(day) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            return Some(JoiningDate::Day(day));
        }
        // No offset given: read as UTC.
        if let Ok(local) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(JoiningDate::Instant(local.and_utc()));
        }
        DateTime::parse_from_rfc3339(value)
            .ok()
            .map(|instant| JoiningDate::Instant(instant.with_timezone(&Utc)))
    }

    /// Days compare against today's UTC date, so today itself is never after `now`.
    pub fn is_after(&self, now: DateTime<Utc>) -> bool {
        match self {
            JoiningDate::Day(day) => *day > now.date_naive(),
            JoiningDate::Instant(instant) => *instant > now,
        }
    }

    pub fn to_utc(&self) -> DateTime<Utc> {
        match self {
            JoiningDate::Day(day) => day.and_time(NaiveTime::MIN).and_utc(),
            JoiningDate::Instant(instant) => *instant,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &str, code: &str, message: impl Into<String>) -> Self {
        FieldViolation {
            field: field.to_string(),
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn body(code: &str, message: impl Into<String>) -> Self {
        FieldViolation::new(BODY_FIELD, code, message)
    }
}

fn violation(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Evaluates every field of `raw` against the rules of `tier`, collecting all
/// violations.
pub fn check(raw: &Value, tier: Tier, now: DateTime<Utc>) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let Some(object) = raw.as_object() else {
        errors.add(BODY_FIELD, violation("invalid_type", "Expected an object"));
        return Err(errors);
    };

    for field in EMPLOYEE_SCHEMA.iter() {
        match object.get(field.name) {
            None | Some(Value::Null) => errors.add(field.name, violation("required", "Required")),
            Some(Value::String(value)) => {
                for spec in field.rules.iter().filter(|spec| spec.applies_to(tier)) {
                    if !spec.rule.check(value, now) {
                        errors.add(field.name, violation(spec.rule.code(), spec.message));
                    }
                }
            }
            Some(_) => errors.add(field.name, violation("invalid_type", "Expected string")),
        }
    }

    if errors.errors().is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Runs the authoritative server-tier check and normalizes the payload.
pub fn validate_employee(raw: &Value, now: DateTime<Utc>) -> Result<NewEmployee, ValidationErrors> {
    check(raw, Tier::Server, now)?;

    let text = |name: &str| raw.get(name).and_then(Value::as_str).unwrap_or_default().to_string();
    let date_of_joining = raw
        .get("dateOfJoining")
        .and_then(Value::as_str)
        .and_then(JoiningDate::parse)
        .map(|date| date.to_utc())
        .expect("dateOfJoining passed the server-tier ValidDate rule");

    Ok(NewEmployee {
        employee_id: text("employeeId"),
        name: text("name"),
        email: text("email"),
        phone: text("phone"),
        department: text("department"),
        date_of_joining,
        role: text("role"),
    })
}

/// Flattens validator errors into a list ordered by schema field.
pub fn violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let field_errors = errors.field_errors();
    std::iter::once(BODY_FIELD)
        .chain(EMPLOYEE_SCHEMA.iter().map(|field| field.name))
        .filter_map(|name| field_errors.get(name).map(|list| (name, list)))
        .flat_map(|(name, list)| {
            list.iter().map(move |error| FieldViolation {
                field: name.to_string(),
                code: error.code.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| error.code.to_string()),
            })
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct FormField {
    pub name: &'static str,
    pub rules: Vec<&'static RuleSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<&'static [&'static str]>,
}

#[derive(Debug, Serialize)]
pub struct FormSchema {
    pub tier: Tier,
    pub fields: Vec<FormField>,
}

/// Describes the rules of `tier` in a form a browser can evaluate.
pub fn form_schema(tier: Tier) -> FormSchema {
    let fields = EMPLOYEE_SCHEMA
        .iter()
        .map(|field| FormField {
            name: field.name,
            rules: field.rules.iter().filter(|spec| spec.applies_to(tier)).collect(),
            choices: (!field.choices.is_empty()).then_some(field.choices),
        })
        .collect();
    FormSchema { tier, fields }
}
