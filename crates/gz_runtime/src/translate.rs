//! Rewrites host error messages into GenZ ones.

use std::sync::OnceLock;

use regex::Regex;

use crate::rules::{error_rules, ErrorRuleTable, FALLBACK_PREFIX};

const VAR_FALLBACK: &str = "that variable";
const TOKEN_FALLBACK: &str = "unknown thing";
/// QuickJS names the operand of iteration failures `value`, whatever the
/// program called it.
const ENGINE_PLACEHOLDER: &str = "value";

/// Translate a host error with the built-in rule table.
///
/// Never fails: unknown kinds and unmatched messages come back as
/// `"Oops! You cooked so hard that it broke. <original message>"`.
pub fn translate(kind: &str, message: &str) -> String {
    error_rules().translate(kind, message)
}

impl ErrorRuleTable {
    /// Translate with this table. See [`translate`].
    pub fn translate(&self, kind: &str, message: &str) -> String {
        let message = if message.is_empty() {
            "Unknown error"
        } else {
            message
        };

        match self.find(kind, message) {
            Some(rule) => render(rule.template, message),
            None => format!("{FALLBACK_PREFIX} {message}"),
        }
    }
}

fn render(template: &str, message: &str) -> String {
    if template.contains("{var}") {
        return match extract_var(message) {
            Some(var) => template.replacen("{var}", var, 1),
            None => template
                .replacen("'{var}'", VAR_FALLBACK, 1)
                .replacen("{var}", VAR_FALLBACK, 1),
        };
    }

    if template.contains("{token}") {
        let token = extract_token(message).unwrap_or(TOKEN_FALLBACK);
        return template.replacen("{token}", token, 1);
    }

    template.to_string()
}

fn regex(cell: &'static OnceLock<Option<Regex>>, pattern: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(pattern).ok()).as_ref()
}

/// Name of the variable a message is about: the first quoted identifier
/// (`'ghost' is not defined`, `Cannot access 'x' before initialization`),
/// else a bare leading name (`ghost is not defined`, `obj.f is not a function`).
fn extract_var(message: &str) -> Option<&str> {
    static QUOTED: OnceLock<Option<Regex>> = OnceLock::new();
    static LEADING: OnceLock<Option<Regex>> = OnceLock::new();

    let quoted = regex(&QUOTED, r#"['"`]([A-Za-z_$][\w$]*)['"`]"#)?;
    if let Some(caps) = quoted.captures(message) {
        return caps.get(1).map(|m| m.as_str());
    }

    let leading = regex(&LEADING, r"^([A-Za-z_$][\w$.]*)\s")?;
    leading
        .captures(message)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| *name != ENGINE_PLACEHOLDER)
}

/// The offending token of a syntax error: `Unexpected token '}'`,
/// `unexpected token in expression: ')'`, `Unexpected identifier 'foo'`.
fn extract_token(message: &str) -> Option<&str> {
    static TOKEN: OnceLock<Option<Regex>> = OnceLock::new();

    let token = regex(
        &TOKEN,
        r#"(?i)unexpected (?:token|identifier)(?: in [a-z ]+)?:?\s*(?:'([^']*)'|"([^"]*)"|(\S+))"#,
    )?;
    let caps = token.captures(message)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))
        .map(|m| m.as_str())
        .filter(|token| !token.is_empty())
}
