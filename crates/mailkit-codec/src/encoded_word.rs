//! RFC 2047 encoded words for header values.
//!
//! Encoding produces `Q` words only. Decoding accepts both `Q` and `B`
//! words, drops the whitespace between adjacent words and leaves any text
//! outside them untouched.

use std::fmt::Write as _;
use std::sync::LazyLock;

use ::base64::Engine;
use ::base64::alphabet;
use ::base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use ::base64::engine::DecodePaddingMode;
use regex::Regex;

use crate::charset;
use crate::quoted_printable;

/// Maximum length of a single encoded word.
const MAX_WORD: usize = 75;

/// Smallest payload budget per word, for absurdly long charset labels.
const MIN_PAYLOAD: usize = 12;

/// Base64 engine tolerant of missing or extra padding.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[allow(clippy::expect_used)]
fn word_regex() -> Regex {
    Regex::new(r"=\?([^?\s]+)\?([QqBb])\?([^?]*)\?=").expect("static regex compiles")
}

static ENCODED_WORD: LazyLock<Regex> = LazyLock::new(word_regex);

/// Returns true if the character can stand for itself inside a `Q` word.
fn is_q_literal(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '!' | '*' | '+' | '-' | '/')
}

/// Encodes a header value as a sequence of `Q` encoded words.
///
/// Values made only of printable ASCII are returned unchanged. Otherwise
/// CR and LF are dropped and the text is split into words of at most 75
/// characters, folded with CRLF and a space. Multi-byte characters are
/// never split across words.
#[must_use]
pub fn encode(charset: Option<&str>, text: &str) -> String {
    if !text.bytes().any(|b| (b < 0x20 && b != b'\t') || b == b'=' || b >= 0x7F) {
        return text.to_string();
    }

    let label = charset
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(charset::DEFAULT_CHARSET);
    let prefix = format!("=?{label}?Q?");
    let budget = MAX_WORD
        .saturating_sub(prefix.len() + 2)
        .max(MIN_PAYLOAD);

    let mut words = Vec::new();
    let mut payload = String::new();
    let mut buf = [0_u8; 4];

    for ch in text.chars().filter(|c| !matches!(c, '\r' | '\n')) {
        let piece = if ch == ' ' {
            "_".to_string()
        } else if is_q_literal(ch) {
            ch.to_string()
        } else {
            let bytes = charset::encode_text(Some(label), ch.encode_utf8(&mut buf));
            bytes.iter().fold(String::new(), |mut acc, byte| {
                let _ = write!(acc, "={byte:02X}");
                acc
            })
        };

        if !payload.is_empty() && payload.len() + piece.len() > budget {
            words.push(format!("{prefix}{payload}?="));
            payload.clear();
        }
        payload.push_str(&piece);
    }

    if !payload.is_empty() || words.is_empty() {
        words.push(format!("{prefix}{payload}?="));
    }

    words.join("\r\n ")
}

/// Decodes every encoded word found in a header value.
///
/// Folded lines are unfolded first. Words that fail to decode are kept
/// literally.
#[must_use]
pub fn decode(text: &str) -> String {
    let unfolded = unfold(text);
    let mut result = String::with_capacity(unfolded.len());
    let mut last_end = 0;
    let mut previous_was_word = false;

    for captures in ENCODED_WORD.captures_iter(&unfolded) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        let between = &unfolded[last_end..whole.start()];
        if !(previous_was_word && between.trim().is_empty()) {
            result.push_str(between);
        }

        match decode_word(&captures[1], &captures[2], &captures[3]) {
            Some(decoded) => result.push_str(&decoded),
            None => result.push_str(whole.as_str()),
        }

        last_end = whole.end();
        previous_was_word = true;
    }

    result.push_str(&unfolded[last_end..]);
    result
}

/// Joins folded header lines into one, replacing each fold with a space.
fn unfold(text: &str) -> String {
    if !text.contains('\n') {
        return text.to_string();
    }
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn decode_word(charset: &str, encoding: &str, payload: &str) -> Option<String> {
    // RFC 2231 language suffix, e.g. "utf-8*en"
    let charset = charset.split('*').next().unwrap_or(charset);

    if encoding.eq_ignore_ascii_case("q") {
        let text = payload.replace('_', " ");
        Some(quoted_printable::unescape(Some(charset), &text))
    } else {
        match LENIENT.decode(payload) {
            Ok(bytes) => Some(charset::decode_bytes(Some(charset), &bytes).into_owned()),
            Err(e) => {
                tracing::debug!(error = %e, "Invalid base64 encoded word");
                None
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ascii_unchanged() {
        assert_eq!(encode(None, "Hello World"), "Hello World");
        assert_eq!(decode("Hello World"), "Hello World");
    }

    #[test]
    fn test_encode_non_ascii() {
        assert_eq!(encode(Some("utf-8"), "Café"), "=?utf-8?Q?Caf=C3=A9?=");
        assert_eq!(encode(None, "a b=c"), "=?utf-8?Q?a_b=3Dc?=");
        assert_eq!(
            encode(Some("iso-8859-1"), "Café"),
            "=?iso-8859-1?Q?Caf=E9?="
        );
    }

    #[test]
    fn test_encode_splits_long_values() {
        let text = "é".repeat(40);
        let encoded = encode(Some("utf-8"), &text);
        let words: Vec<&str> = encoded.split("\r\n ").collect();
        assert!(words.len() > 1);
        for word in &words {
            assert!(word.len() <= MAX_WORD, "word too long: {word}");
            assert!(word.starts_with("=?utf-8?Q?") && word.ends_with("?="));
            // No character split across words
            assert!(word.trim_end_matches("?=").ends_with("=A9"));
        }
        assert_eq!(decode(&encoded), text);
    }

    #[test]
    fn test_encode_drops_line_breaks() {
        assert_eq!(encode(None, "é\r\nx"), "=?utf-8?Q?=C3=A9x?=");
    }

    #[test]
    fn test_decode_q_word() {
        assert_eq!(decode("=?utf-8?Q?Caf=C3=A9?="), "Café");
        assert_eq!(decode("=?UTF-8?q?hello_world?="), "hello world");
        assert_eq!(decode("=?iso-8859-1?Q?Caf=E9?="), "Café");
    }

    #[test]
    fn test_decode_b_word() {
        assert_eq!(decode("=?UTF-8?B?SGVsbG8gV29ybGQ=?="), "Hello World");
        // Missing padding
        assert_eq!(decode("=?UTF-8?B?SGVsbG8gV29ybGQ?="), "Hello World");
    }

    #[test]
    fn test_decode_mixed_text() {
        assert_eq!(
            decode("Re: =?utf-8?Q?Caf=C3=A9?= meeting"),
            "Re: Café meeting"
        );
    }

    #[test]
    fn test_decode_adjacent_words() {
        assert_eq!(decode("=?utf-8?Q?Hello?= =?utf-8?Q?_World?="), "Hello World");
        assert_eq!(
            decode("=?utf-8?Q?Caf=C3?=\r\n =?utf-8?Q?=A9?="),
            "Caf\u{fffd}\u{fffd}"
        );
    }

    #[test]
    fn test_decode_language_suffix() {
        assert_eq!(decode("=?utf-8*en?Q?hi?="), "hi");
    }

    #[test]
    fn test_decode_invalid_word_kept() {
        assert_eq!(decode("=?utf-8?B?!!!?="), "=?utf-8?B?!!!?=");
    }

    proptest! {
        #[test]
        fn encoded_words_round_trip(s in "[^\r\n]{0,120}") {
            let encoded = encode(Some("utf-8"), &s);
            for word in encoded.split("\r\n ") {
                prop_assert!(word.len() <= MAX_WORD);
            }
            prop_assert_eq!(decode(&encoded), s);
        }
    }
}
