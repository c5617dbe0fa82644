//! Byte-stream acquisition: local files and HTTP(S) URLs

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::convert::Infallible;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use encoding_rs::Encoding;

use crate::error::{Result, TableError};

/// Default read timeout for remote sources
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Where a table comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Path(PathBuf),
    Url(String),
}

impl From<&str> for Input {
    fn from(s: &str) -> Self {
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Input::Url(s.to_string())
        } else {
            Input::Path(PathBuf::from(s))
        }
    }
}

impl FromStr for Input {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Input::from(s))
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Path(path) => write!(f, "{}", path.display()),
            Input::Url(url) => f.write_str(url),
        }
    }
}

/// Connection settings for remote sources
#[derive(Debug, Clone)]
pub struct HttpOptions {
    /// Proxy as `host:port` (HTTP) or a `http://`, `https://`, `socks5://` or
    /// `socks5h://` URL; `None` connects directly, ignoring proxy variables
    pub proxy: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            proxy: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl HttpOptions {
    /// Route requests through a proxy
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn proxy_url(&self) -> Option<String> {
        self.proxy.as_ref().map(|p| {
            if p.contains("://") {
                p.clone()
            } else {
                format!("http://{}", p)
            }
        })
    }
}

/// An opened remote stream
pub struct Fetched {
    pub body: Box<dyn Read>,
    /// Charset declared by the server, if it named a known one
    pub charset: Option<&'static Encoding>,
}

/// Open a local file for reading
pub fn open_path(path: &Path) -> Result<File> {
    Ok(File::open(path)?)
}

/// Whether a `Content-Type` value names CSV
pub fn is_csv_content_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|mime| mime.trim().eq_ignore_ascii_case("text/csv"))
        .unwrap_or(false)
}

/// Extract the `charset` parameter of a `Content-Type` value
pub fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    let label = content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"'))
    })?;

    let encoding = Encoding::for_label(label.as_bytes());
    if encoding.is_none() {
        tracing::warn!("Ignoring unknown charset \"{}\"", label);
    }
    encoding
}

#[cfg(feature = "http")]
fn client(options: &HttpOptions) -> Result<reqwest::blocking::Client> {
    let builder = reqwest::blocking::Client::builder().timeout(options.timeout);
    let builder = match options.proxy_url() {
        Some(proxy) => builder.proxy(reqwest::Proxy::all(proxy)?),
        None => builder.no_proxy(),
    };
    Ok(builder.build()?)
}

/// Fetch a URL with a blocking GET request
#[cfg(feature = "http")]
pub fn fetch(url: &str, options: &HttpOptions) -> Result<Fetched> {
    use reqwest::header::CONTENT_TYPE;

    tracing::debug!("GET {}", url);
    let response = client(options)?.get(url).send()?.error_for_status()?;

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    if !is_csv_content_type(&content_type) {
        return Err(TableError::UnexpectedContentType(content_type));
    }

    Ok(Fetched {
        body: Box::new(response),
        charset: charset_from_content_type(&content_type),
    })
}

#[cfg(not(feature = "http"))]
pub fn fetch(url: &str, _options: &HttpOptions) -> Result<Fetched> {
    Err(TableError::Unsupported(format!(
        "{} (built without the `http` feature)",
        url
    )))
}
