//! Blocking HTTP client for the tracker.
//!
//! Uses the curl crate (libcurl) with one Easy handle per request. Every
//! request carries the configured User-Agent and Accept-Language, follows
//! redirects, and sends cookies from the caller's jar. Nothing is retried.

mod error;
mod parse;

pub use error::RequestError;
pub use parse::header_values;

use crate::config::ClonerConfig;
use crate::cookies::CookieJar;
use std::borrow::Borrow;
use std::str;
use std::time::Duration;
use url::Url;

/// A completed response with a 2xx final status.
#[derive(Debug, Clone)]
pub struct Response {
    pub code: u32,
    /// Raw header lines, including those of intermediate redirects.
    pub headers: Vec<String>,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct TrackerClient {
    user_agent: String,
    accept_language: String,
    connect_timeout: Option<Duration>,
    timeout: Option<Duration>,
}

impl TrackerClient {
    pub fn new(cfg: &ClonerConfig) -> Self {
        Self {
            user_agent: cfg.user_agent.clone(),
            accept_language: cfg.accept_language.clone(),
            connect_timeout: cfg.connect_timeout(),
            timeout: cfg.timeout(),
        }
    }

    pub fn get(&self, url: &Url, jar: &CookieJar) -> Result<Response, RequestError> {
        self.perform(url, None, jar)
    }

    /// POSTs `fields` as `application/x-www-form-urlencoded`.
    pub fn post_form<I, K, V>(
        &self,
        url: &Url,
        fields: I,
        jar: &CookieJar,
    ) -> Result<Response, RequestError>
    where
        I: IntoIterator,
        I::Item: Borrow<(K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let body = encode_form(fields);
        self.perform(url, Some(body.as_bytes()), jar)
    }

    fn perform(
        &self,
        url: &Url,
        post_body: Option<&[u8]>,
        jar: &CookieJar,
    ) -> Result<Response, RequestError> {
        let method = if post_body.is_some() { "POST" } else { "GET" };
        let mut headers: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url.as_str())?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.useragent(&self.user_agent)?;
        if let Some(t) = self.connect_timeout {
            easy.connect_timeout(t)?;
        }
        if let Some(t) = self.timeout {
            easy.timeout(t)?;
        }

        let mut list = curl::easy::List::new();
        list.append(&format!("Accept-Language: {}", self.accept_language))?;
        if let Some(cookie) = jar.header_value() {
            list.append(&format!("Cookie: {}", cookie))?;
        }
        if let Some(data) = post_body {
            easy.post(true)?;
            easy.post_fields_copy(data)?;
            // No 100-continue round trip for large clone forms.
            list.append("Expect:")?;
        }
        easy.http_headers(list)?;

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    headers.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        tracing::debug!(method, url = %url, code, bytes = body.len(), "tracker response");
        if !(200..300).contains(&code) {
            return Err(RequestError::Http(code));
        }

        Ok(Response {
            code,
            headers,
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }
}

/// Encodes name/value pairs as an `application/x-www-form-urlencoded` body.
pub fn encode_form<I, K, V>(fields: I) -> String
where
    I: IntoIterator,
    I::Item: Borrow<(K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish()
}
