//! The error translation table.
//!
//! [`ERROR_RULES`] lists, per host error kind, the message patterns we know
//! how to restyle. Rules of one kind are tried in declaration order and the
//! first match wins. Patterns cover both V8 and QuickJS phrasings of the
//! same failure.

use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};
use serde::Serialize;

/// Prefix of the message produced when no rule applies.
pub const FALLBACK_PREFIX: &str = "Oops! You cooked so hard that it broke.";

/// One restyling rule. `template` holds at most one of `{var}` / `{token}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ErrorRule {
    pub kind: &'static str,
    /// Case-insensitive regular expression tested against the message.
    pub pattern: &'static str,
    pub template: &'static str,
}

const fn rule(kind: &'static str, pattern: &'static str, template: &'static str) -> ErrorRule {
    ErrorRule {
        kind,
        pattern,
        template,
    }
}

const BURNED_KITCHEN: &str = "You cooked too hard and burned the kitchen.";
const CONST_SWITCH_UP: &str = "You said variable was fr. You can't switch up now!";
const BEFORE_SPAWN: &str = "Hold up, you can't use '{var}' before it spawns.";

pub static ERROR_RULES: &[ErrorRule] = &[
    // undefined references
    rule(
        "ReferenceError",
        "is not defined",
        "L Bruh. '{var}' is not defined. Who is that?",
    ),
    rule(
        "ReferenceError",
        r#"cannot access ['"`]?.+?['"`]? before initialization"#,
        BEFORE_SPAWN,
    ),
    rule("ReferenceError", "is not initialized", BEFORE_SPAWN),
    // type misuse
    rule(
        "TypeError",
        "is not a function",
        "Bro, '{var}' is not a function. Stop trying to make it cook.",
    ),
    rule(
        "TypeError",
        "not a function",
        "Bro, that's not a function. Stop trying to make it cook.",
    ),
    rule("TypeError", "Assignment to constant variable", CONST_SWITCH_UP),
    rule("TypeError", "is read-only", CONST_SWITCH_UP),
    rule(
        "TypeError",
        "Cannot read propert(?:y|ies)",
        "Bruh, you're trying to read properties of an NPC (null/undefined).",
    ),
    rule(
        "TypeError",
        "is not iterable",
        "You can't spam through '{var}'. It's not a list.",
    ),
    // malformed programs; QuickJS reports end of input as an empty token
    rule(
        "SyntaxError",
        "Unexpected end of (?:input|string)|unexpected token in expression: ''$",
        "Bro left me on read. Unexpected end of input.",
    ),
    rule(
        "SyntaxError",
        "Unexpected token",
        "Vibe check failed. Unexpected token: '{token}'",
    ),
    rule(
        "SyntaxError",
        "Unexpected identifier",
        "Who invited '{token}'? Unexpected identifier.",
    ),
    rule(
        "SyntaxError",
        "Function statements require a function name|function name expected",
        "Yo, it needs a name to cook.",
    ),
    rule(
        "SyntaxError",
        "Unexpected string",
        "Yo, this string shouldn't be here. Delete it.",
    ),
    // resource exhaustion
    rule("RangeError", "Maximum call stack size exceeded", BURNED_KITCHEN),
    rule(
        "RangeError",
        "Invalid array length",
        "That array size is sus. (Invalid array length)",
    ),
    rule("InternalError", "stack overflow", BURNED_KITCHEN),
];

/// A rule with its pattern compiled.
#[derive(Debug)]
pub struct CompiledRule {
    pub rule: &'static ErrorRule,
    pub regex: Regex,
}

/// [`ErrorRule`]s grouped by kind, in declaration order.
#[derive(Debug)]
pub struct ErrorRuleTable {
    rules: &'static [ErrorRule],
    groups: Vec<(&'static str, Vec<CompiledRule>)>,
}

impl ErrorRuleTable {
    /// Group and compile `rules`. A pattern that does not compile is skipped
    /// with a warning so translation itself can never fail.
    pub fn new(rules: &'static [ErrorRule]) -> Self {
        let mut groups: Vec<(&'static str, Vec<CompiledRule>)> = Vec::new();

        for rule in rules {
            let regex = match RegexBuilder::new(rule.pattern).case_insensitive(true).build() {
                Ok(regex) => regex,
                Err(e) => {
                    tracing::warn!(kind = rule.kind, pattern = rule.pattern, error = %e, "skipping error rule");
                    continue;
                }
            };
            let compiled = CompiledRule { rule, regex };
            match groups.iter_mut().find(|(kind, _)| *kind == rule.kind) {
                Some((_, group)) => group.push(compiled),
                None => groups.push((rule.kind, vec![compiled])),
            }
        }

        Self { rules, groups }
    }

    /// The declared rules, ungrouped, for documentation.
    pub fn rules(&self) -> &'static [ErrorRule] {
        self.rules
    }

    /// Error kinds that have at least one rule, in first-declaration order.
    pub fn kinds(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.groups.iter().map(|(kind, _)| *kind)
    }

    pub fn group(&self, kind: &str) -> Option<&[CompiledRule]> {
        self.groups
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, group)| group.as_slice())
    }

    /// First rule of `kind` whose pattern matches `message`.
    pub fn find(&self, kind: &str, message: &str) -> Option<&'static ErrorRule> {
        self.group(kind)?
            .iter()
            .find(|c| c.regex.is_match(message))
            .map(|c| c.rule)
    }
}

/// The process-wide table built from [`ERROR_RULES`].
pub fn error_rules() -> &'static ErrorRuleTable {
    static TABLE: OnceLock<ErrorRuleTable> = OnceLock::new();
    TABLE.get_or_init(|| ErrorRuleTable::new(ERROR_RULES))
}
