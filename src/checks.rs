//! Primitive validity predicates.
//!
//! Plain pure functions for the common field checks: email and UUID syntax,
//! password length, integers and ids, ISO dates, JSON strings, regex
//! matches, and set membership. Each returns `Some(messages)` on failure and
//! `None` on success, the contract of an extra check.
//!
//! The lowercase functions operate on natural Rust types; the adapter
//! constructors ([`email`], [`uuid`], ...) lift them onto
//! [`ExtraCheck`]s for attachment to a [`LeafRule`](crate::LeafRule). A
//! predicate runs only after presence and type checks have passed, so the
//! adapters accept a value of the wrong JSON type silently rather than
//! duplicating the type error.
//!
//! # Example
//!
//! ```rust
//! use shapecheck::{check_shape, checks, LeafRule, Shape};
//! use serde_json::json;
//!
//! let shape = Shape::new().field("email", LeafRule::new().check(checks::email()));
//!
//! let mut input = json!({"email": " john@doe.com"});
//! let errors = check_shape(&mut input, &shape).unwrap();
//! assert_eq!(
//!     errors.to_value(),
//!     json!({"email": ["email must not contain any whitespace (before or after)"]})
//! );
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::shape::ExtraCheck;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^[a-z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?)*$",
    )
    .expect("email regex must compile")
});

static UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
        .expect("uuid regex must compile")
});

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date regex must compile"));

/// Checks that a string is a plausible email address.
///
/// Surrounding whitespace is reported separately from a malformed address,
/// so callers get the more actionable message.
pub fn email_check(email: &str) -> Option<Vec<String>> {
    if email.trim() != email {
        return Some(vec![
            "email must not contain any whitespace (before or after)".to_string(),
        ]);
    }
    if !EMAIL_RE.is_match(email) {
        return Some(vec!["email invalid".to_string()]);
    }
    None
}

/// Checks that a string is a UUID (any version).
pub fn uuid_check(uuid: &str) -> Option<Vec<String>> {
    if !UUID_RE.is_match(uuid) {
        return Some(vec!["uuid invalid".to_string()]);
    }
    None
}

/// Checks the password policy: at least 9 characters.
pub fn password_check(password: &str) -> Option<Vec<String>> {
    let mut problems = Vec::new();
    if password.chars().count() < 9 {
        problems.push("password length smaller than 8".to_string());
    }
    if problems.is_empty() {
        None
    } else {
        Some(problems)
    }
}

/// Checks that a string matches a regex.
pub fn regex_check(s: &str, regex: &Regex) -> Option<Vec<String>> {
    if !regex.is_match(s) {
        return Some(vec![format!("regex /{}/ not satisfied", regex.as_str())]);
    }
    None
}

/// Checks that a number is a (safe) integer, rejecting negatives unless
/// allowed.
pub fn integer_check(n: f64, allow_negatives: bool) -> Option<Vec<String>> {
    // Mirrors a safe-integer test: integral and exactly representable.
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    if !n.is_finite() || n.fract() != 0.0 || n.abs() > MAX_SAFE_INTEGER {
        return Some(vec!["must be an integer".to_string()]);
    }
    if n < 0.0 && !allow_negatives {
        return Some(vec!["negative numbers are not accepted".to_string()]);
    }
    None
}

/// Checks that a number is usable as an identifier: a non-negative integer.
pub fn id_check(n: f64) -> Option<Vec<String>> {
    let problems = integer_check(n, false)?;
    // Map the sign complaint to an id-specific message.
    if problems.first().is_some_and(|m| m.starts_with('n')) {
        return Some(vec!["id must be greater than 0".to_string()]);
    }
    Some(problems)
}

/// Checks that a string is an ISO calendar date (`yyyy-mm-dd`).
pub fn date_check(s: &str) -> Option<Vec<String>> {
    let invalid = || Some(vec!["must be a date (yyyy-mm-dd)".to_string()]);
    if !DATE_RE.is_match(s) {
        return invalid();
    }
    // The regex guarantees digit groups, so the parses cannot fail.
    let month: u32 = s[5..7].parse().unwrap_or(0);
    let day: u32 = s[8..10].parse().unwrap_or(0);
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return invalid();
    }
    None
}

/// Checks that a string parses as JSON.
pub fn json_check(s: &str) -> Option<Vec<String>> {
    if serde_json::from_str::<Value>(s).is_err() {
        return Some(vec!["must be a JSON".to_string()]);
    }
    None
}

/// Checks that a string is one of an allowed set.
pub fn membership_check(s: &str, allowed: &[&str]) -> Option<Vec<String>> {
    if !allowed.contains(&s) {
        return Some(vec![format!("must be one of: {}", allowed.join(", "))]);
    }
    None
}

/// Extra check for email fields.
pub fn email() -> ExtraCheck {
    ExtraCheck::new(|v| v.as_str().and_then(email_check))
}

/// Extra check for UUID fields.
pub fn uuid() -> ExtraCheck {
    ExtraCheck::new(|v| v.as_str().and_then(uuid_check))
}

/// Extra check for password fields.
pub fn password() -> ExtraCheck {
    ExtraCheck::new(|v| v.as_str().and_then(password_check))
}

/// Extra check matching a regex against string fields.
pub fn pattern(regex: Regex) -> ExtraCheck {
    ExtraCheck::new(move |v| v.as_str().and_then(|s| regex_check(s, &regex)))
}

/// Extra check for integer-valued number fields.
pub fn integer(allow_negatives: bool) -> ExtraCheck {
    ExtraCheck::new(move |v| v.as_f64().and_then(|n| integer_check(n, allow_negatives)))
}

/// Extra check for identifier fields.
pub fn id() -> ExtraCheck {
    ExtraCheck::new(|v| v.as_f64().and_then(id_check))
}

/// Extra check for ISO date fields.
pub fn date() -> ExtraCheck {
    ExtraCheck::new(|v| v.as_str().and_then(date_check))
}

/// Extra check for fields holding a JSON document as a string.
pub fn json_string() -> ExtraCheck {
    ExtraCheck::new(|v| v.as_str().and_then(json_check))
}

/// Extra check restricting a string field to an allowed set.
pub fn member_of(allowed: Vec<String>) -> ExtraCheck {
    ExtraCheck::new(move |v| {
        let refs: Vec<&str> = allowed.iter().map(String::as_str).collect();
        v.as_str().and_then(|s| membership_check(s, &refs))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_email_check() {
        assert_eq!(email_check("john@doe.com"), None);
        assert_eq!(email_check("tm8045@ch.ibm.com"), None);
        assert_eq!(
            email_check("johndoe.com"),
            Some(vec!["email invalid".to_string()])
        );
        assert_eq!(
            email_check(" tm8045@ch.ibm.com"),
            Some(vec![
                "email must not contain any whitespace (before or after)".to_string()
            ])
        );
        // Interior whitespace fails the address syntax, not the padding rule.
        assert_eq!(
            email_check("john @doe.com"),
            Some(vec!["email invalid".to_string()])
        );
    }

    #[test]
    fn test_uuid_check() {
        assert_eq!(uuid_check("983aa206-a047-48b6-82b0-96873d9e4dd5"), None);
        assert_eq!(uuid_check("jo"), Some(vec!["uuid invalid".to_string()]));
    }

    #[test]
    fn test_password_check() {
        assert_eq!(password_check("john@doe.com"), None);
        assert_eq!(
            password_check("jo"),
            Some(vec!["password length smaller than 8".to_string()])
        );
    }

    #[test]
    fn test_regex_check() {
        let re = Regex::new(r"^My\d{3}$").unwrap();
        assert_eq!(regex_check("My123", &re), None);
        assert_eq!(
            regex_check("My1234", &re),
            Some(vec![r"regex /^My\d{3}$/ not satisfied".to_string()])
        );
    }

    #[test]
    fn test_integer_check() {
        assert_eq!(integer_check(12.0, false), None);
        assert_eq!(
            integer_check(12.3, false),
            Some(vec!["must be an integer".to_string()])
        );
        assert_eq!(
            integer_check(-12.0, false),
            Some(vec!["negative numbers are not accepted".to_string()])
        );
        assert_eq!(integer_check(-12.0, true), None);
    }

    #[test]
    fn test_id_check() {
        assert_eq!(id_check(12.0), None);
        assert_eq!(
            id_check(-1.0),
            Some(vec!["id must be greater than 0".to_string()])
        );
        assert_eq!(id_check(1.54), Some(vec!["must be an integer".to_string()]));
    }

    #[test]
    fn test_date_check() {
        assert_eq!(date_check("2024-02-29"), None);
        assert_eq!(
            date_check("2024-13-01"),
            Some(vec!["must be a date (yyyy-mm-dd)".to_string()])
        );
        assert_eq!(
            date_check("01-01-2024"),
            Some(vec!["must be a date (yyyy-mm-dd)".to_string()])
        );
    }

    #[test]
    fn test_json_check() {
        assert_eq!(json_check(r#"{"name": "John", "age": 30}"#), None);
        assert_eq!(json_check("[1, 2, 3, 4]"), None);
        assert_eq!(json_check(r#""This is a valid JSON string""#), None);
        assert_eq!(
            json_check(r#"{name: "John", age: 30}"#),
            Some(vec!["must be a JSON".to_string()])
        );
        assert_eq!(
            json_check("[1, 2, 3, 4"),
            Some(vec!["must be a JSON".to_string()])
        );
        assert_eq!(
            json_check("Invalid JSON"),
            Some(vec!["must be a JSON".to_string()])
        );
    }

    #[test]
    fn test_membership_check() {
        assert_eq!(membership_check("admin", &["admin", "user"]), None);
        assert_eq!(
            membership_check("root", &["admin", "user"]),
            Some(vec!["must be one of: admin, user".to_string()])
        );
    }

    #[test]
    fn test_adapters_skip_wrong_json_types() {
        // Adapters only fire on the type the predicate understands; the
        // leaf type check owns type errors.
        assert_eq!(email().run(&json!(42)), None);
        assert_eq!(id().run(&json!("12")), None);
    }

    #[test]
    fn test_adapters_run_predicates() {
        assert!(email().run(&json!("nope")).is_some());
        assert!(uuid().run(&json!("jo")).is_some());
        assert!(password().run(&json!("jo")).is_some());
        assert!(date().run(&json!("yesterday")).is_some());
        assert!(json_string().run(&json!("{oops")).is_some());
        assert!(integer(false).run(&json!(1.5)).is_some());
        assert_eq!(integer(true).run(&json!(-3)), None);

        let member = member_of(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(member.run(&json!("a")), None);
        assert!(member.run(&json!("c")).is_some());

        let pat = pattern(Regex::new(r"^\d+$").unwrap());
        assert_eq!(pat.run(&json!("123")), None);
        assert!(pat.run(&json!("abc")).is_some());
    }
}
