//! Environment variable expansion over another source's payload.
//!
//! Responsibilities:
//! - Replace `$NAME` and `${NAME}` placeholders with process environment values.
//! - Return the wrapped payload untouched when it holds no `$`.
//!
//! Does NOT handle:
//! - Default values (`${NAME:-x}`) or escaping; `$$` is kept literally.
//! - Non-UTF-8 payloads, which pass through unchanged.
//!
//! Invariants:
//! - Undefined variables expand to an empty string.
//! - `NAME` is one or more ASCII alphanumerics or underscores.
//! - A `$` not followed by a name, and an unterminated `${`, are kept literally.

use std::borrow::Cow;

use async_trait::async_trait;

use super::Source;
use crate::context::OperationContext;
use crate::error::Result;

/// Source adapter that expands environment placeholders in the wrapped payload.
///
/// Useful when a config file or HTTP payload carries placeholders such as
/// `"${PORT}"` that should be resolved at runtime.
#[derive(Debug, Clone)]
pub struct ExpandEnv<S> {
    inner: S,
}

impl<S: Source> ExpandEnv<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

#[async_trait]
impl<S: Source> Source for ExpandEnv<S> {
    async fn read(&self, ctx: &OperationContext) -> Result<Vec<u8>> {
        let data = self.inner.read(ctx).await?;
        if !data.contains(&b'$') {
            return Ok(data);
        }
        let Ok(text) = std::str::from_utf8(&data) else {
            return Ok(data);
        };
        match expand_env_str(text) {
            Cow::Borrowed(_) => Ok(data),
            Cow::Owned(expanded) => Ok(expanded.into_bytes()),
        }
    }
}

/// Expand `$NAME` / `${NAME}` using the process environment.
pub fn expand_env_str(input: &str) -> Cow<'_, str> {
    expand_with(input, |name| std::env::var(name).unwrap_or_default())
}

fn expand_with(input: &str, lookup: impl Fn(&str) -> String) -> Cow<'_, str> {
    if !input.contains('$') {
        return Cow::Borrowed(input);
    }

    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut copied = 0;
    let mut i = 0;
    let mut changed = false;

    while i < bytes.len() {
        if bytes[i] != b'$' {
            i += 1;
            continue;
        }
        let Some((name, consumed)) = placeholder(&input[i + 1..]) else {
            i += 1;
            continue;
        };
        out.push_str(&input[copied..i]);
        out.push_str(&lookup(name));
        i += 1 + consumed;
        copied = i;
        changed = true;
    }

    if !changed {
        return Cow::Borrowed(input);
    }
    out.push_str(&input[copied..]);
    Cow::Owned(out)
}

/// Parse the placeholder following a `$`, returning the name and how many
/// bytes after the `$` it spans.
fn placeholder(rest: &str) -> Option<(&str, usize)> {
    if let Some(braced) = rest.strip_prefix('{') {
        let end = braced.find('}')?;
        let name = &braced[..end];
        if !name.bytes().all(is_name_byte) {
            return None;
        }
        return Some((name, end + 2));
    }
    let len = rest.bytes().take_while(|b| is_name_byte(*b)).count();
    if len == 0 {
        return None;
    }
    Some((&rest[..len], len))
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
