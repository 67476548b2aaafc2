//! Redaction hook applied to every message before it reaches the sink.
//!
//! The default is `PassThrough`: no policy is assumed. `KeyRedactor` is an
//! opt-in policy driven by an explicit key list. Values wrapped in
//! `Sensitive<T>` are always rendered as the placeholder, independently of
//! the hook.

use tracelog_core_types::SENSITIVE_VALUE_REPLACEMENT;

/// Rewrites a rendered message before emission
pub trait Redactor: Send + Sync {
    fn redact(&self, message: String) -> String;
}

/// Returns the message unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl Redactor for PassThrough {
    fn redact(&self, message: String) -> String {
        message
    }
}

/// Replaces the value of `key=value` and `key: value` pairs for the
/// configured keys with `*****`.
///
/// Keys match case-insensitively on a word boundary. A value runs until
/// whitespace or one of `, ; & ) ] }`; a double-quoted value runs to its
/// closing quote.
///
/// ```
/// use tracelog_core::redaction::{KeyRedactor, Redactor};
///
/// let redactor = KeyRedactor::new(["password", "token"]);
/// assert_eq!(
///     redactor.redact("user=alice password=hunter2, Token: abc".to_string()),
///     "user=alice password=*****, Token: *****"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct KeyRedactor {
    keys: Vec<String>,
}

impl KeyRedactor {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys = keys
            .into_iter()
            .map(|k| k.into().to_ascii_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keys }
    }

    /// Offset where the value starts if one of the keys begins at `pos`
    fn value_start(&self, lower: &[u8], pos: usize) -> Option<usize> {
        if pos > 0 && is_word_byte(lower[pos - 1]) {
            return None;
        }

        self.keys.iter().find_map(|key| {
            if !lower[pos..].starts_with(key.as_bytes()) {
                return None;
            }
            let mut j = skip_spaces(lower, pos + key.len());
            match lower.get(j) {
                Some(b'=') | Some(b':') => {
                    j = skip_spaces(lower, j + 1);
                    Some(j)
                }
                _ => None,
            }
        })
    }
}

impl Redactor for KeyRedactor {
    fn redact(&self, message: String) -> String {
        if self.keys.is_empty() {
            return message;
        }

        // ASCII lowercasing keeps byte offsets identical to `message`.
        let lower = message.to_ascii_lowercase();
        let lower = lower.as_bytes();
        let bytes = message.as_bytes();

        let mut out = String::with_capacity(message.len());
        let mut copied = 0;
        let mut pos = 0;

        while pos < bytes.len() {
            if let Some(start) = self.value_start(lower, pos) {
                let end = value_end(bytes, start);
                if end > start {
                    out.push_str(&message[copied..start]);
                    out.push_str(SENSITIVE_VALUE_REPLACEMENT);
                    copied = end;
                    pos = end;
                    continue;
                }
            }
            pos += 1;
        }

        out.push_str(&message[copied..]);
        out
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn skip_spaces(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i] == b' ' {
        i += 1;
    }
    i
}

fn value_end(bytes: &[u8], start: usize) -> usize {
    if bytes.get(start) == Some(&b'"') {
        return bytes[start + 1..]
            .iter()
            .position(|b| *b == b'"')
            .map(|p| start + 1 + p + 1)
            .unwrap_or(bytes.len());
    }

    bytes[start..]
        .iter()
        .position(|b| {
            b.is_ascii_whitespace() || matches!(b, b',' | b';' | b'&' | b')' | b']' | b'}')
        })
        .map(|p| start + p)
        .unwrap_or(bytes.len())
}
