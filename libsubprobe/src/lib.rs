mod http;
pub mod netlify;
mod prober;
mod transport;
mod types;

pub use http::probe_client_builder;
pub use netlify::{NetlifyClient, NetlifyError, SiteDomain};
pub use prober::Prober;
pub use transport::{HttpTransport, Transport, TransportError};
pub use types::{candidate_host, probe_url, ProbeConfig, ProbeOutcome, Verdict};

/// Parent domain the service answers for.
pub const DEFAULT_PARENT_DOMAIN: &str = "fosscu.org";

pub async fn check_availability(
    subdomain: &str,
    parent: &str,
) -> Result<ProbeOutcome, TransportError> {
    Ok(Prober::new()?.check(subdomain, parent).await)
}
