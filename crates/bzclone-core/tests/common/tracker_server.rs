//! Minimal HTTP/1.1 server that imitates the tracker pages the clone workflow uses.
//!
//! Serves index.cgi (cookie seeding, login form, login POST), enter_bug.cgi
//! (clone form, only with a session cookie) and post_bug.cgi (confirmation
//! page). Every request is recorded so tests can assert on what was sent.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

pub const EMAIL: &str = "dev@example.com";
pub const PASSWORD: &str = "correct horse";
const REQUEST_COOKIE: &str = "Bugzilla_login_request_cookie";
const REQUEST_COOKIE_VALUE: &str = "req-123";
const SESSION_COOKIE: &str = "Bugzilla_logincookie";
const SESSION_COOKIE_VALUE: &str = "sess-abc";
const LOGIN_TOKEN: &str = "1583493125-tok";
pub const NEW_BUG_ID: &str = "12345";

#[derive(Debug, Clone, Copy)]
pub struct TrackerOptions {
    /// If false, the login page has no Bugzilla_login_token input.
    pub serve_login_token: bool,
    /// If false, the confirmation page has no show_bug.cgi link.
    pub confirmation_links: bool,
    /// If false, enter_bug.cgi answers logged-in users with a page without the bug form.
    pub serve_clone_form: bool,
    /// Status returned by enter_bug.cgi (200 = normal page).
    pub enter_bug_status: u16,
    /// Status returned by post_bug.cgi (200 = normal confirmation page).
    pub post_bug_status: u16,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            serve_login_token: true,
            confirmation_links: true,
            serve_clone_form: true,
            enter_bug_status: 200,
            post_bug_status: 200,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path including query string.
    pub target: String,
    pub headers: HashMap<String, String>,
    pub form: HashMap<String, String>,
}

impl RecordedRequest {
    pub fn path(&self) -> &str {
        self.target.split('?').next().unwrap_or("")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn cookies(&self) -> HashMap<String, String> {
        self.header("cookie")
            .map(|c| {
                c.split(';')
                    .filter_map(|p| p.trim().split_once('='))
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

pub struct TrackerServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl TrackerServer {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

pub fn start() -> TrackerServer {
    start_with_options(TrackerOptions::default())
}

/// Starts the server in a background thread; it runs until the process exits.
pub fn start_with_options(opts: TrackerOptions) -> TrackerServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let log = Arc::clone(&log);
            thread::spawn(move || handle(stream, opts, &log));
        }
    });
    TrackerServer {
        base_url: format!("http://127.0.0.1:{}/", port),
        requests,
    }
}

fn handle(mut stream: TcpStream, opts: TrackerOptions, log: &Mutex<Vec<RecordedRequest>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));
    let Some(req) = read_request(&mut stream) else {
        return;
    };
    log.lock().unwrap().push(req.clone());

    let cookies = req.cookies();
    let has_request_cookie = cookies.get(REQUEST_COOKIE).map(String::as_str) == Some(REQUEST_COOKIE_VALUE);
    let has_session = cookies.get(SESSION_COOKIE).map(String::as_str) == Some(SESSION_COOKIE_VALUE);

    match (req.method.as_str(), req.path()) {
        ("GET", "/index.cgi") if !has_request_cookie => respond(
            &mut stream,
            "200 OK",
            &[format!("Set-Cookie: {}={}; path=/; secure", REQUEST_COOKIE, REQUEST_COOKIE_VALUE)],
            "<html><body><a href=\"index.cgi?GoAheadAndLogIn=1\">Log In</a></body></html>",
        ),
        ("GET", "/index.cgi") => respond(&mut stream, "200 OK", &[], &login_page(opts.serve_login_token)),
        ("POST", "/index.cgi") => {
            let ok = has_request_cookie
                && req.form.get("Bugzilla_login").map(String::as_str) == Some(EMAIL)
                && req.form.get("Bugzilla_password").map(String::as_str) == Some(PASSWORD)
                && req.form.get("Bugzilla_login_token").map(String::as_str) == Some(LOGIN_TOKEN)
                && req.form.get("GoAheadAndLogIn").map(String::as_str) == Some("1");
            if ok {
                respond(
                    &mut stream,
                    "200 OK",
                    &[
                        "Set-Cookie: Bugzilla_login=42; path=/; secure; HttpOnly".to_string(),
                        format!("Set-Cookie: {}={}; path=/; secure; HttpOnly", SESSION_COOKIE, SESSION_COOKIE_VALUE),
                        format!("Set-Cookie: {}=; path=/; expires=Sun, 01-Jan-1995 00:00:00 GMT", REQUEST_COOKIE),
                    ],
                    "<html><body>Welcome</body></html>",
                )
            } else {
                respond(&mut stream, "200 OK", &[], "<html><body>Invalid Username Or Password</body></html>")
            }
        }
        ("GET", "/enter_bug.cgi") if opts.enter_bug_status != 200 => {
            let status = format!("{} Server Error", opts.enter_bug_status);
            respond(&mut stream, &status, &[], "<html><body>Software error</body></html>")
        }
        ("GET", "/enter_bug.cgi") if has_session && opts.serve_clone_form => {
            respond(&mut stream, "200 OK", &[], CLONE_FORM)
        }
        ("GET", "/enter_bug.cgi") if has_session => respond(
            &mut stream,
            "200 OK",
            &[],
            "<html><body>You are not authorized to access bug #1812863.</body></html>",
        ),
        ("GET", "/enter_bug.cgi") => respond(&mut stream, "200 OK", &[], "<html><body>Log in to file a bug</body></html>"),
        ("POST", "/post_bug.cgi") if opts.post_bug_status != 200 => {
            let status = format!("{} Server Error", opts.post_bug_status);
            respond(&mut stream, &status, &[], "<html><body>Software error</body></html>")
        }
        ("POST", "/post_bug.cgi") if has_session && opts.confirmation_links => {
            let desc = req.form.get("short_desc").cloned().unwrap_or_default();
            respond(&mut stream, "200 OK", &[], &confirmation_page(&desc))
        }
        ("POST", "/post_bug.cgi") => respond(&mut stream, "200 OK", &[], "<html><body><div id=\"error_msg\">Bug not filed</div></body></html>"),
        _ => respond(&mut stream, "404 Not Found", &[], "not found"),
    }
}

fn login_page(with_token: bool) -> String {
    let token = if with_token {
        format!("<input type=\"hidden\" name=\"Bugzilla_login_token\" value=\"{}\">", LOGIN_TOKEN)
    } else {
        String::new()
    };
    format!(
        r#"<html><body>
<form class="mini_login" id="mini_login_top" action="index.cgi" method="POST">
  <input id="Bugzilla_login_top" name="Bugzilla_login">
  <input type="password" id="Bugzilla_password_top" name="Bugzilla_password">
  {}
  <input type="submit" name="GoAheadAndLogIn" value="Log in">
</form>
</body></html>"#,
        token
    )
}

const CLONE_FORM: &str = r#"<html><body>
<form name="Create" class="enter_bug_form" method="post" action="post_bug.cgi">
  <input type="hidden" name="product" value="OpenShift Container Platform">
  <input type="hidden" name="token" value="form-token">
  <input type="text" name="short_desc" value="Router drops idle connections">
  <input type="submit" name="maketemplate" value="Remember values as bookmarkable template">
  <select name="target_release">
    <option value="---">---</option>
    <option value="4.4.0" selected>4.4.0</option>
  </select>
  <select name="component">
    <option value="Routing" selected>Routing</option>
  </select>
  <textarea name="comment">+++ This bug was initially created as a clone of Bug #1812863 +++</textarea>
</form>
</body></html>"#;

fn confirmation_page(desc: &str) -> String {
    format!(
        r#"<html><body>
<form name="changeform" id="changeform" method="post" action="process_bug.cgi">
  <div class="bz_short_desc_container edit_form">
    <a href="show_bug.cgi?id={id}"><b>Bug&nbsp;{id}</b></a> -
    <span id="short_desc_nonedit_display">{desc}</span>
  </div>
</form>
</body></html>"#,
        id = NEW_BUG_ID,
        desc = desc
    )
}

fn respond(stream: &mut TcpStream, status: &str, extra_headers: &[String], body: &str) {
    let mut head = format!(
        "HTTP/1.1 {}\r\nContent-Type: text/html; charset=UTF-8\r\nContent-Length: {}\r\nConnection: close\r\n",
        status,
        body.len()
    );
    for h in extra_headers {
        head.push_str(h);
        head.push_str("\r\n");
    }
    head.push_str("\r\n");
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body.as_bytes());
    let _ = stream.flush();
}

/// Reads one request: head up to the blank line, then `Content-Length` bytes of body.
fn read_request(stream: &mut TcpStream) -> Option<RecordedRequest> {
    let mut buf: Vec<u8> = Vec::new();
    let mut chunk = [0u8; 8192];
    let head_end = loop {
        if let Some(pos) = find_subslice(&buf, b"\r\n\r\n") {
            break pos;
        }
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = std::str::from_utf8(&buf[..head_end]).ok()?.to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let target = request_line.next()?.to_string();
    let headers: HashMap<String, String> = lines
        .filter_map(|l| l.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .get("content-length")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = buf[head_end + 4..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }

    let form = url::form_urlencoded::parse(&body)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    Some(RecordedRequest {
        method,
        target,
        headers,
        form,
    })
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
