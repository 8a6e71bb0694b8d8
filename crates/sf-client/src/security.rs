//! Input hygiene for values that end up in SOQL text or URL paths.
//!
//! `query` sends its SOQL string as-is, so any caller-supplied literal must
//! be escaped before being spliced into the query:
//!
//! ```rust
//! use sforce_client::security::soql;
//!
//! let name = soql::escape_string("O'Brien");
//! let query = format!("SELECT Id FROM Contact WHERE LastName = '{}'", name);
//! assert_eq!(query, "SELECT Id FROM Contact WHERE LastName = 'O\\'Brien'");
//! ```

/// SOQL escaping and identifier validation.
pub mod soql {
    /// Escape a value for use inside a single-quoted SOQL string literal.
    #[must_use]
    pub fn escape_string(value: &str) -> String {
        let mut escaped = String::with_capacity(value.len() + 8);
        for ch in value.chars() {
            match ch {
                '\'' => escaped.push_str("\\'"),
                '\\' => escaped.push_str("\\\\"),
                '"' => escaped.push_str("\\\""),
                '\n' => escaped.push_str("\\n"),
                '\r' => escaped.push_str("\\r"),
                '\t' => escaped.push_str("\\t"),
                _ => escaped.push(ch),
            }
        }
        escaped
    }

    /// Escape a value for a `LIKE` pattern; `%` and `_` match literally.
    #[must_use]
    pub fn escape_like(value: &str) -> String {
        escape_string(value)
            .replace('%', "\\%")
            .replace('_', "\\_")
    }

    /// Check that a string is a plausible sObject API name.
    ///
    /// Accepts a leading ASCII letter followed by letters, digits and
    /// underscores, which covers standard objects (`Account`), custom
    /// objects (`Invoice__c`) and namespaced ones (`ns__Invoice__c`).
    /// Anything else could escape the `sobjects/{name}/` path segment.
    ///
    /// ```rust
    /// use sforce_client::security::soql;
    ///
    /// assert!(soql::is_safe_sobject_name("Account"));
    /// assert!(soql::is_safe_sobject_name("ns__Invoice__c"));
    /// assert!(!soql::is_safe_sobject_name("Account/../limits"));
    /// ```
    #[must_use]
    pub fn is_safe_sobject_name(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() => {
                chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
            }
            _ => false,
        }
    }
}
