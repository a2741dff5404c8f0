use crate::{
    transport::{HttpTransport, Transport, TransportError},
    types::{candidate_host, probe_url, ProbeConfig, ProbeOutcome, Verdict},
};
use std::{sync::Arc, time::Instant};

/// Decides whether a hostname looks unused by asking it for headers over
/// HTTPS, then plain HTTP. Any answer means "in use"; a transport failure on
/// both schemes means "available".
#[derive(Clone)]
pub struct Prober {
    transport: Arc<dyn Transport>,
}

impl Prober {
    pub fn new() -> Result<Self, TransportError> {
        Self::with_config(ProbeConfig::default())
    }

    pub fn with_config(config: ProbeConfig) -> Result<Self, TransportError> {
        Ok(Self::with_transport(HttpTransport::new(&config)?))
    }

    pub fn with_transport<T>(transport: T) -> Self
    where
        T: Transport + 'static,
    {
        Self {
            transport: Arc::new(transport),
        }
    }

    pub async fn check(&self, subdomain: &str, parent: &str) -> ProbeOutcome {
        let start = Instant::now();
        let host = candidate_host(subdomain, parent);

        let urls = (
            probe_url("https", &host, parent),
            probe_url("http", &host, parent),
        );
        let verdict = match urls {
            (Some(https), Some(http)) => {
                if self.answers(&https).await {
                    Verdict::InUse
                } else if self.answers(&http).await {
                    Verdict::InUseHttpOnly
                } else {
                    Verdict::Available
                }
            }
            _ => {
                tracing::debug!(host = %host, parent, "candidate leaves the parent domain; not probing");
                Verdict::Available
            }
        };

        let message = verdict.message(&host);
        let duration = start.elapsed();
        tracing::info!(host = %host, verdict = ?verdict, ?duration, "{}", message);

        ProbeOutcome {
            host,
            verdict,
            message,
            duration,
        }
    }

    async fn answers(&self, url: &str) -> bool {
        match self.transport.head(url).await {
            Ok(status) => {
                tracing::debug!(url, status, "probe answered");
                true
            }
            Err(e) => {
                tracing::debug!(url, error = %e, "probe failed");
                false
            }
        }
    }
}

impl std::fmt::Debug for Prober {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prober").finish_non_exhaustive()
    }
}
