//! Email addresses and address lists.

use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)]
fn email_regex() -> Regex {
    Regex::new(
        r"^([a-zA-Z0-9_\-\.]+)@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.)|(([a-zA-Z0-9\-]+\.)+))([a-zA-Z]{2,63}|[0-9]{1,3})(\]?)$",
    )
    .expect("static regex compiles")
}

static EMAIL: LazyLock<Regex> = LazyLock::new(email_regex);

/// Syntactic check of a bare email address.
///
/// Accepts `local@domain.tld` and `local@[a.b.c.d]`. This is a shape check
/// only; it says nothing about deliverability.
#[must_use]
pub fn check_email(email: &str) -> bool {
    !email.is_empty() && EMAIL.is_match(email)
}

/// A mailbox: optional display name and address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address {
    /// Display name.
    pub name: Option<String>,
    /// Email address.
    pub email: String,
}

impl Address {
    /// Creates an address with an optional display name.
    #[must_use]
    pub fn new(name: Option<&str>, email: impl Into<String>) -> Self {
        Self {
            name: name.map(ToString::to_string),
            email: email.into(),
        }
    }

    /// Parses `Name <addr>` or a bare address.
    ///
    /// The split happens at the last `<`. The name is trimmed and a quoted
    /// name is unquoted with `\"` and `\\` unescaped; an empty name
    /// becomes `None`.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        let Some(open) = text.rfind('<') else {
            return Self {
                name: None,
                email: text.to_string(),
            };
        };

        let rest = &text[open + 1..];
        let email = rest.rfind('>').map_or(rest, |close| &rest[..close]);
        let name = unquote(text[..open].trim());
        let name = name.trim();

        Self {
            name: (!name.is_empty()).then(|| name.to_string()),
            email: email.trim().to_string(),
        }
    }

    /// Returns true if no address is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.email.is_empty()
    }

    /// Renders `Name <addr>`, or just the address when there is no name.
    #[must_use]
    pub fn full_email(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => format!("{name} <{}>", self.email),
            _ => self.email.clone(),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_email())
    }
}

impl From<&str> for Address {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

/// Removes one pair of surrounding double quotes and unescapes the quoted
/// pairs `\"` and `\\` inside them. Unquoted text is returned as is.
pub(crate) fn unquote(text: &str) -> Cow<'_, str> {
    let Some(inner) = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
    else {
        return Cow::Borrowed(text);
    };
    if !inner.contains('\\') {
        return Cow::Borrowed(inner);
    }

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(ch) = chars.next() {
        match (ch, chars.peek()) {
            ('\\', Some(&next @ ('"' | '\\'))) => {
                out.push(next);
                chars.next();
            }
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Splits at commas outside double-quoted strings.
fn split_list(text: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;

    for (index, ch) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                entries.push(&text[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    entries.push(&text[start..]);

    entries
}

/// An ordered list of addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Addresses(Vec<Address>);

impl Addresses {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Parses a comma-separated list, skipping empty entries.
    ///
    /// Commas inside a quoted display name do not separate entries.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        split_list(text)
            .into_iter()
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(Address::parse)
            .collect()
    }

    /// Appends an address.
    pub fn push(&mut self, address: impl Into<Address>) {
        self.0.push(address.into());
    }

    /// Returns the number of addresses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the addresses.
    pub fn iter(&self) -> std::slice::Iter<'_, Address> {
        self.0.iter()
    }

    /// Returns mutable access to the addresses.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Address> {
        self.0.iter_mut()
    }

    /// Joins every address with `", "`.
    #[must_use]
    pub fn full_email(&self) -> String {
        self.0
            .iter()
            .map(Address::full_email)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Addresses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_email())
    }
}

impl FromIterator<Address> for Addresses {
    fn from_iter<I: IntoIterator<Item = Address>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Addresses {
    type Item = Address;
    type IntoIter = std::vec::IntoIter<Address>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Addresses {
    type Item = &'a Address;
    type IntoIter = std::slice::Iter<'a, Address>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_named() {
        let address = Address::parse("Jose Bautista <jbautistam@gmail.com>");
        assert_eq!(address.name.as_deref(), Some("Jose Bautista"));
        assert_eq!(address.email, "jbautistam@gmail.com");
    }

    #[test]
    fn test_parse_bare() {
        let address = Address::parse("a@b.com");
        assert_eq!(address.name, None);
        assert_eq!(address.email, "a@b.com");
    }

    #[test]
    fn test_parse_quoted_name() {
        let address = Address::parse("\"Doe, John\" <john@example.com>");
        assert_eq!(address.name.as_deref(), Some("Doe, John"));
        assert_eq!(address.email, "john@example.com");

        let address = Address::parse("<only@example.com>");
        assert_eq!(address.name, None);
        assert_eq!(address.email, "only@example.com");
    }

    #[test]
    fn test_parse_escaped_name() {
        let address = Address::parse(r#""A \"B\" C" <a@example.com>"#);
        assert_eq!(address.name.as_deref(), Some(r#"A "B" C"#));

        let address = Address::parse(r#""back\\slash" <b@example.com>"#);
        assert_eq!(address.name.as_deref(), Some(r"back\slash"));

        // Outside quotes a backslash is literal
        let address = Address::parse(r"C:\dir <c@example.com>");
        assert_eq!(address.name.as_deref(), Some(r"C:\dir"));
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("plain"), "plain");
        assert_eq!(unquote(r#""a;b""#), "a;b");
        assert_eq!(unquote(r#""x\"y""#), r#"x"y"#);
        assert_eq!(unquote(r#""C:\path""#), r"C:\path");
    }

    #[test]
    fn test_parse_unclosed() {
        let address = Address::parse("Name <open@example.com");
        assert_eq!(address.email, "open@example.com");
    }

    #[test]
    fn test_full_email() {
        assert_eq!(
            Address::new(Some("Ann"), "ann@example.com").full_email(),
            "Ann <ann@example.com>"
        );
        assert_eq!(
            Address::new(None, "ann@example.com").to_string(),
            "ann@example.com"
        );
    }

    #[test]
    fn test_check_email() {
        assert!(check_email("foo@bar.com"));
        assert!(check_email("first.last-x_y@sub.domain.museum"));
        assert!(check_email("foo@[192.168.0.1]"));
        assert!(!check_email("not-an-email"));
        assert!(!check_email("foo@bar"));
        assert!(!check_email(""));
    }

    #[test]
    fn test_addresses_parse() {
        let list = Addresses::parse("a@b.com, c@d.com");
        assert_eq!(list.len(), 2);
        let emails: Vec<&str> = list.iter().map(|a| a.email.as_str()).collect();
        assert_eq!(emails, vec!["a@b.com", "c@d.com"]);
    }

    #[test]
    fn test_addresses_skip_empty() {
        let list = Addresses::parse(" , Ann <ann@x.org>,, bob@y.org ,");
        assert_eq!(list.len(), 2);
        assert_eq!(list.full_email(), "Ann <ann@x.org>, bob@y.org");
        assert!(Addresses::parse("").is_empty());
    }

    #[test]
    fn test_addresses_quoted_comma() {
        let list = Addresses::parse(r#""Doe, John" <j@x.org>, "Lee \"Al, Jr\"" <al@x.org>, z@y.org"#);
        assert_eq!(list.len(), 3);
        let names: Vec<Option<&str>> = list.iter().map(|a| a.name.as_deref()).collect();
        assert_eq!(
            names,
            vec![Some("Doe, John"), Some(r#"Lee "Al, Jr""#), None]
        );
        assert_eq!(list.iter().nth(1).unwrap().email, "al@x.org");
    }

    #[test]
    fn test_addresses_push() {
        let mut list = Addresses::new();
        list.push("Ann <ann@x.org>");
        list.push(Address::new(None, "bob@y.org"));
        assert_eq!(list.to_string(), "Ann <ann@x.org>, bob@y.org");
    }

    proptest! {
        #[test]
        fn full_email_parses_back(
            name in "[A-Za-z0-9.'-]([A-Za-z0-9 .'-]{0,20}[A-Za-z0-9.'-])?",
            email in "[a-z0-9._-]{1,12}@[a-z]{1,10}\\.(org|com|net)",
        ) {
            let address = Address::new(Some(name.as_str()), email.as_str());
            prop_assert_eq!(Address::parse(&address.full_email()), address.clone());
            prop_assert_eq!(Address::parse(&email), Address::new(None, email.as_str()));
        }

        #[test]
        fn unquoted_commas_split_lists(emails in proptest::collection::vec("[a-z]{1,8}@[a-z]{1,8}\\.org", 0..6)) {
            let list = Addresses::parse(&emails.join(", "));
            let parsed: Vec<&str> = list.iter().map(|a| a.email.as_str()).collect();
            prop_assert_eq!(parsed, emails.iter().map(String::as_str).collect::<Vec<_>>());
        }
    }
}
