use reqwest::Url;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Available,
    InUse,
    /// Only the plain-HTTP probe got an answer.
    InUseHttpOnly,
}

impl Verdict {
    pub fn is_available(&self) -> bool {
        matches!(self, Verdict::Available)
    }

    pub fn is_in_use(&self) -> bool {
        !self.is_available()
    }

    pub fn message(&self, host: &str) -> String {
        match self {
            Verdict::Available => format!("Subdomain '{}' appears to be available!", host),
            Verdict::InUse => format!("Subdomain '{}' is already in use.", host),
            Verdict::InUseHttpOnly => {
                format!("Subdomain '{}' is already in use (HTTP only).", host)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    pub host: String,
    pub verdict: Verdict,
    pub message: String,
    pub duration: Duration,
}

impl ProbeOutcome {
    pub fn is_available(&self) -> bool {
        self.verdict.is_available()
    }

    /// The `(available, message)` pair callers usually want.
    pub fn into_pair(self) -> (bool, String) {
        (self.verdict.is_available(), self.message)
    }
}

#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub timeout: Duration,
    pub max_redirects: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            max_redirects: 10,
        }
    }
}

pub fn candidate_host(subdomain: &str, parent: &str) -> String {
    format!("{}.{}", subdomain, parent)
}

/// `{scheme}://{host}`, or `None` when the URL would not point at a host
/// under `parent` on the scheme's default port. A subdomain carrying `/`,
/// `#`, `?` or `:` can otherwise move the request somewhere else entirely.
pub fn probe_url(scheme: &str, host: &str, parent: &str) -> Option<String> {
    let raw = format!("{}://{}", scheme, host);
    let url = Url::parse(&raw).ok()?;
    let suffix = format!(".{}", parent.to_ascii_lowercase());

    let stays_under_parent = url
        .host_str()
        .is_some_and(|h| h.len() > suffix.len() && h.ends_with(&suffix));

    (stays_under_parent && url.port().is_none()).then_some(raw)
}
