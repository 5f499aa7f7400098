//! Lexical skipper
//!
//! Strips comments and leading whitespace from the text the parser has not
//! consumed yet. Comments are removed from the whole remaining text, not just
//! its front: `// ...` runs to the end of the line and `/* ... */` blocks do
//! not nest.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"//[^\n\r]*|/\*(?s:.*?)\*/").expect("comment pattern is valid"));

/// Remove every comment from `text`, repeating until the text stops
/// changing. Borrows when there is nothing to remove.
///
/// A suffix of the result holds no comment either, so a parser can strip a
/// whole program once and afterwards only trim whitespace.
pub fn strip_comments(text: &str) -> Cow<'_, str> {
    let mut current = Cow::Borrowed(text);
    loop {
        let stripped = match COMMENT.replace_all(&current, "") {
            Cow::Borrowed(_) => None,
            Cow::Owned(s) => Some(s),
        };
        match stripped {
            Some(s) => current = Cow::Owned(s),
            None => return current,
        }
    }
}

/// Remove every comment from `text`, then drop leading whitespace.
///
/// Idempotent: `skip_space(&skip_space(t)) == skip_space(t)`.
pub fn skip_space(text: &str) -> String {
    strip_comments(text).trim_start().to_string()
}
