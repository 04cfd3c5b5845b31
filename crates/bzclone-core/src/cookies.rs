//! In-memory cookie jar threaded explicitly through every tracker request.
//!
//! Only name/value pairs are kept: the tool talks to a single host for the
//! lifetime of one process, so domain/path scoping does not apply.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    cookies: BTreeMap<String, String>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Cookie names only; values are session secrets and must not be logged.
    pub fn names(&self) -> Vec<&str> {
        self.cookies.keys().map(String::as_str).collect()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.insert(name.into(), value.into());
    }

    /// Applies one `Set-Cookie` header value. An empty value or `Max-Age<=0` deletes the cookie.
    pub fn absorb_set_cookie(&mut self, header_value: &str) {
        let mut parts = header_value.split(';');
        let Some((name, value)) = parts.next().and_then(|p| p.split_once('=')) else {
            return;
        };
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        let value = value.trim();

        let expired = parts.any(|attr| match attr.split_once('=') {
            Some((k, v)) if k.trim().eq_ignore_ascii_case("max-age") => {
                v.trim().parse::<i64>().map(|n| n <= 0).unwrap_or(false)
            }
            _ => false,
        });

        if expired || value.is_empty() {
            self.cookies.remove(name);
        } else {
            self.cookies.insert(name.to_string(), value.to_string());
        }
    }

    /// Applies every `Set-Cookie` line from raw response header lines.
    pub fn absorb_headers(&mut self, lines: &[String]) {
        for value in crate::http::header_values(lines, "set-cookie") {
            self.absorb_set_cookie(value);
        }
    }

    /// Value for a `Cookie:` request header, or None if the jar is empty.
    pub fn header_value(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        let pairs: Vec<String> = self
            .cookies
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        Some(pairs.join("; "))
    }
}
