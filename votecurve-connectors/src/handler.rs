//! Request handler
//!
//! Query string in, [`Response`] out. The handler owns the mapping from
//! failures to status codes; the engine itself never fails on data.

use votecurve_core::{time::Clock, Engine, SampleSource, Timeframe};

use crate::SourceError;

/// Query parameter selecting the timeframe
pub const TIMEFRAME_PARAM: &str = "tf";

/// Minimal HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Status code
    pub status: u16,
    /// Header name/value pairs
    pub headers: Vec<(&'static str, String)>,
    /// Body text
    pub body: String,
}

impl Response {
    /// 200 with a JSON body, never cached
    pub fn json(body: String) -> Self {
        Self {
            status: 200,
            headers: vec![
                ("content-type", "application/json".into()),
                ("cache-control", "no-store".into()),
            ],
            body,
        }
    }

    /// Plain-text error
    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            headers: vec![("content-type", "text/plain; charset=utf-8".into())],
            body: message.into(),
        }
    }

    /// First header named `name`, case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Timeframe token from a raw query string, uppercased; `1D` when absent
///
/// Accepts the query with or without its leading `?`. Keys and values are
/// form-decoded (`+` is a space, `%XX` a byte) before matching.
pub fn timeframe_token(query: &str) -> String {
    query
        .trim_start_matches('?')
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(key, _)| form_decode(key) == TIMEFRAME_PARAM)
        .map(|(_, value)| form_decode(value).trim().to_ascii_uppercase())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| Timeframe::DEFAULT.as_str().to_string())
}

/// `application/x-www-form-urlencoded` decoding of one key or value
///
/// Malformed escapes are kept as-is; invalid UTF-8 is replaced.
fn form_decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' => {
                let hex = bytes.get(i + 1..i + 3).and_then(|h| std::str::from_utf8(h).ok());
                match hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                    Some(byte) => {
                        out.push(byte);
                        i += 2;
                    }
                    None => out.push(b'%'),
                }
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Fetch, compute and serialize one series
pub fn handle<S, C>(query: &str, source: &S, clock: &C, engine: &Engine) -> Response
where
    S: SampleSource<Error = SourceError> + ?Sized,
    C: Clock + ?Sized,
{
    let token = timeframe_token(query);

    match engine.compute_from(source, clock, &token) {
        Ok(series) => match serde_json::to_string(&series) {
            Ok(body) => Response::json(body),
            Err(e) => Response::error(500, e.to_string()),
        },
        Err(err) => {
            log::warn!("tf={token}: {err}");
            Response::error(err.status_code(), err.to_string())
        }
    }
}

/// Handle a request against the environment-configured form
///
/// Missing credentials surface as a 500 before any request is made.
#[cfg(feature = "http")]
pub fn handle_from_env(query: &str) -> Response {
    use votecurve_core::time::SystemClock;

    match crate::forms::FormsClient::from_env() {
        Ok(client) => handle(query, &client, &SystemClock, &Engine::default()),
        Err(err) => {
            log::error!("{err}");
            Response::error(err.status_code(), err.to_string())
        }
    }
}
