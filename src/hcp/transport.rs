//! HTTP transport
//!
//! [`Transport`] executes fully built requests and buffers the response body.
//! The dumping variant additionally tees every request and response, bodies
//! included, into an append-only log file with credential headers redacted.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::{debug, warn};
use reqwest::header::HeaderMap;
use reqwest::{Client, Request, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::http_log;
use crate::error::{Result, TfeError};

const SEPARATOR: &str =
    "================================================================================";

/// Buffered HTTP response
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(TfeError::from)
    }

    /// Body as (lossy) UTF-8 text
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Best-effort message from a JSON:API error document
    pub fn error_detail(&self) -> Option<String> {
        let value: serde_json::Value = serde_json::from_slice(&self.body).ok()?;
        let first = value.get("errors")?.get(0)?;
        first
            .get("detail")
            .and_then(|d| d.as_str())
            .filter(|d| !d.is_empty())
            .or_else(|| first.get("title").and_then(|t| t.as_str()))
            .map(|s| s.to_string())
    }
}

/// Build the shared reqwest client with connection settings
fn build_http_client() -> Client {
    Client::builder()
        .pool_max_idle_per_host(20)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(120))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Executes requests, optionally dumping them to a log file
#[derive(Debug, Clone)]
pub enum Transport {
    Direct(Client),
    Dumping(DumpingTransport),
}

impl Transport {
    /// Default transport without logging
    pub fn direct() -> Self {
        Transport::Direct(build_http_client())
    }

    /// Underlying reqwest client, used to build requests
    pub fn http(&self) -> &Client {
        match self {
            Transport::Direct(client) => client,
            Transport::Dumping(t) => &t.inner,
        }
    }

    /// Send a request and buffer the whole response
    pub async fn round_trip(&self, request: Request) -> Result<RawResponse> {
        match self {
            Transport::Direct(client) => execute(client, request).await,
            Transport::Dumping(t) => t.round_trip(request).await,
        }
    }
}

async fn execute(client: &Client, request: Request) -> Result<RawResponse> {
    let response = client.execute(request).await?;
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.bytes().await?.to_vec();
    Ok(RawResponse {
        status,
        headers,
        body,
    })
}

/// Shared handle on the HTTP dump file
#[derive(Debug, Clone)]
pub struct HttpLog {
    path: PathBuf,
    file: Arc<Mutex<Option<File>>>,
}

impl HttpLog {
    /// Open (create or append) the log file and write the session banner
    pub fn open(path: &Path) -> Result<Self> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                TfeError::Config(format!(
                    "failed to open HTTP log file {}: {}",
                    path.display(),
                    e
                ))
            })?;

        writeln!(
            file,
            "\n{}\ntfx HTTP log session started @ {}\n{}",
            SEPARATOR,
            timestamp(),
            SEPARATOR
        )
        .map_err(|e| {
            TfeError::Config(format!(
                "failed to write HTTP log file {}: {}",
                path.display(),
                e
            ))
        })?;

        debug!("HTTP log enabled at {}", path.display());

        Ok(Self {
            path: path.to_path_buf(),
            file: Arc::new(Mutex::new(Some(file))),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append raw bytes; write failures are logged, never surfaced
    fn write(&self, bytes: &[u8]) {
        let Ok(mut guard) = self.file.lock() else {
            return;
        };
        if let Some(file) = guard.as_mut() {
            if let Err(e) = file.write_all(bytes) {
                warn!("Failed to write HTTP log {}: {}", self.path.display(), e);
            }
        }
    }

    /// Write the closing banner, flush and release the file
    ///
    /// Idempotent: later calls do nothing.
    pub fn close(&self) -> Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| TfeError::Io("HTTP log lock poisoned".to_string()))?;
        if let Some(mut file) = guard.take() {
            writeln!(file, "{}\nsession closed @ {}", SEPARATOR, timestamp())?;
            file.flush()?;
            debug!("HTTP log {} closed", self.path.display());
        }
        Ok(())
    }
}

/// Closes the HTTP log when invoked or dropped
#[derive(Debug, Default)]
pub struct LogCloser(Option<HttpLog>);

impl LogCloser {
    pub fn is_active(&self) -> bool {
        self.0.is_some()
    }

    pub fn close(mut self) -> Result<()> {
        match self.0.take() {
            Some(log) => log.close(),
            None => Ok(()),
        }
    }
}

impl Drop for LogCloser {
    fn drop(&mut self) {
        if let Some(log) = self.0.take() {
            let _ = log.close();
        }
    }
}

/// Transport wrapper that tees traffic into an [`HttpLog`]
#[derive(Debug, Clone)]
pub struct DumpingTransport {
    inner: Client,
    log: HttpLog,
}

impl DumpingTransport {
    pub fn new(inner: Client, log: HttpLog) -> Self {
        Self { inner, log }
    }

    async fn round_trip(&self, request: Request) -> Result<RawResponse> {
        let mut entry = format!("{}\nREQUEST @ {}\n", SEPARATOR, timestamp()).into_bytes();
        entry.extend(redact(&dump_request(&request)));
        entry.push(b'\n');
        self.log.write(&entry);

        match execute(&self.inner, request).await {
            Ok(response) => {
                let mut entry = format!("RESPONSE @ {}\n", timestamp()).into_bytes();
                entry.extend(redact(&dump_response(&response)));
                entry.push(b'\n');
                self.log.write(&entry);
                Ok(response)
            }
            Err(e) => {
                let entry = format!("*** ERROR @ {} ***\n{}\n", timestamp(), e);
                self.log.write(entry.as_bytes());
                Err(e)
            }
        }
    }
}

/// Build the transport for a host/token pair
///
/// With `log_path`, the file is opened (append) and a dumping transport is
/// installed; the returned closer must be closed (or dropped) at exit.
pub fn open_client(
    hostname: &str,
    token: &str,
    log_path: Option<&Path>,
) -> Result<(Transport, LogCloser)> {
    if hostname.trim().is_empty() {
        return Err(TfeError::Config("hostname must not be empty".to_string()));
    }
    if token.trim().is_empty() {
        return Err(TfeError::Config("API token must not be empty".to_string()));
    }

    let client = build_http_client();
    match log_path {
        Some(path) => {
            let log = HttpLog::open(path)?;
            Ok((
                Transport::Dumping(DumpingTransport::new(client, log.clone())),
                LogCloser(Some(log)),
            ))
        }
        None => Ok((Transport::Direct(client), LogCloser::default())),
    }
}

fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

fn write_headers(out: &mut Vec<u8>, headers: &HeaderMap) {
    for (name, value) in headers {
        out.extend_from_slice(canonical_header_name(name.as_str()).as_bytes());
        out.extend_from_slice(b": ");
        out.extend_from_slice(value.as_bytes());
        out.push(b'\n');
    }
}

/// `content-type` -> `Content-Type`
fn canonical_header_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// Full request as written to the log, before redaction
fn dump_request(request: &Request) -> Vec<u8> {
    let url = request.url();
    let mut target = url.path().to_string();
    if let Some(query) = url.query() {
        target.push('?');
        target.push_str(query);
    }

    let mut out = format!("{} {} {:?}\n", request.method(), target, request.version()).into_bytes();
    if let Some(host) = url.host_str() {
        out.extend_from_slice(format!("Host: {}\n", host).as_bytes());
    }
    write_headers(&mut out, request.headers());
    out.push(b'\n');
    if let Some(body) = request.body().and_then(|b| b.as_bytes()) {
        out.extend_from_slice(body);
        out.push(b'\n');
    }
    out
}

/// Full response as written to the log, before redaction
fn dump_response(response: &RawResponse) -> Vec<u8> {
    let mut out = format!("HTTP/1.1 {}\n", response.status).into_bytes();
    write_headers(&mut out, &response.headers);
    out.push(b'\n');
    out.extend_from_slice(&response.body);
    out.push(b'\n');
    out
}

fn is_sensitive(name: &str) -> bool {
    http_log::REDACTED_HEADERS
        .iter()
        .any(|h| h.eq_ignore_ascii_case(name.trim()))
}

/// Replace sensitive header values in a dumped request/response
///
/// Only the header block (up to the first empty line) is rewritten; the
/// start line and the body pass through untouched.
pub fn redact(dump: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(dump.len());
    let mut in_headers = true;
    let mut first_line = true;

    for line in dump.split_inclusive(|b| *b == b'\n') {
        if !in_headers {
            out.extend_from_slice(line);
            continue;
        }

        let content = line.strip_suffix(b"\n").unwrap_or(line);
        let content = content.strip_suffix(b"\r").unwrap_or(content);

        if content.is_empty() {
            in_headers = false;
            out.extend_from_slice(line);
            continue;
        }

        if first_line {
            first_line = false;
            out.extend_from_slice(line);
            continue;
        }

        match content.iter().position(|b| *b == b':') {
            Some(idx) if is_sensitive(&String::from_utf8_lossy(&content[..idx])) => {
                out.extend_from_slice(&content[..idx]);
                out.extend_from_slice(b": ");
                out.extend_from_slice(http_log::REDACTED.as_bytes());
                out.extend_from_slice(&line[content.len()..]);
            }
            _ => out.extend_from_slice(line),
        }
    }

    out
}
