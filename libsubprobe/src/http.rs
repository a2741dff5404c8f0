use crate::types::ProbeConfig;
use reqwest::{redirect, Client, ClientBuilder};
use std::time::Duration;

pub fn probe_client_builder(config: &ProbeConfig) -> ClientBuilder {
    Client::builder()
        .timeout(config.timeout)
        .redirect(redirect::Policy::limited(config.max_redirects))
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .tcp_nodelay(true)
        .use_rustls_tls()
}

pub fn create_http_pool(config: &ProbeConfig) -> Result<Client, reqwest::Error> {
    probe_client_builder(config).build()
}
