use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const NETLIFY_API_URL: &str = "https://api.netlify.com/api/v1";

#[derive(Debug, Error)]
pub enum NetlifyError {
    #[error("Failed to build Netlify client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Failed to fetch sites: {0}")]
    FetchError(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct Site {
    name: String,
    url: String,
    #[serde(default)]
    custom_domain: Option<String>,
}

/// A site in the account that has a custom domain bound to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteDomain {
    pub name: String,
    pub domain: String,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct NetlifyClient {
    client: Client,
    base_url: String,
    access_token: String,
}

impl NetlifyClient {
    pub fn new(access_token: impl Into<String>) -> Result<Self, NetlifyError> {
        let client = Client::builder()
            .use_rustls_tls()
            .build()
            .map_err(NetlifyError::Client)?;
        Ok(Self::with_client(client, access_token))
    }

    pub fn with_client(client: Client, access_token: impl Into<String>) -> Self {
        Self {
            client,
            base_url: NETLIFY_API_URL.to_string(),
            access_token: access_token.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sites with a custom domain. Failures are logged and yield an empty list.
    pub async fn list_custom_domains(&self) -> Vec<SiteDomain> {
        match self.try_list_custom_domains().await {
            Ok(sites) => sites,
            Err(e) => {
                tracing::error!(error = %e, "Error fetching sites");
                Vec::new()
            }
        }
    }

    pub async fn try_list_custom_domains(&self) -> Result<Vec<SiteDomain>, NetlifyError> {
        let sites: Vec<Site> = self
            .client
            .get(format!("{}/sites", self.base_url))
            .bearer_auth(&self.access_token)
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let with_domains: Vec<SiteDomain> = sites
            .into_iter()
            .filter_map(|site| {
                let domain = site.custom_domain.filter(|d| !d.is_empty())?;
                Some(SiteDomain {
                    name: site.name,
                    domain,
                    url: site.url,
                })
            })
            .collect();

        tracing::debug!(count = with_domains.len(), "fetched custom-domain sites");
        Ok(with_domains)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> NetlifyClient {
        NetlifyClient::new("secret-token")
            .unwrap()
            .with_base_url(server.url("/api/v1/"))
    }

    #[tokio::test]
    async fn keeps_only_sites_with_a_custom_domain() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/v1/sites")
                    .header("authorization", "Bearer secret-token")
                    .header("content-type", "application/json");
                then.status(200).json_body(json!([
                    {"name": "blog", "url": "https://blog.fosscu.org", "custom_domain": "blog.fosscu.org"},
                    {"name": "scratch", "url": "https://scratch.netlify.app", "custom_domain": null},
                    {"name": "empty", "url": "https://empty.netlify.app", "custom_domain": ""},
                    {"name": "bare", "url": "https://bare.netlify.app"}
                ]));
            })
            .await;

        let sites = client_for(&server).list_custom_domains().await;

        mock.assert_async().await;
        assert_eq!(
            sites,
            vec![SiteDomain {
                name: "blog".to_string(),
                domain: "blog.fosscu.org".to_string(),
                url: "https://blog.fosscu.org".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn unauthorized_yields_empty_list() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/sites");
                then.status(401).json_body(json!({"code": 401, "message": "Access Denied"}));
            })
            .await;

        let client = client_for(&server);

        assert!(client.list_custom_domains().await.is_empty());
        assert!(matches!(
            client.try_list_custom_domains().await,
            Err(NetlifyError::FetchError(_))
        ));
    }

    #[tokio::test]
    async fn malformed_body_yields_empty_list() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/sites");
                then.status(200).body("<html>maintenance</html>");
            })
            .await;

        assert!(client_for(&server).list_custom_domains().await.is_empty());
    }

    #[tokio::test]
    async fn unreachable_api_yields_empty_list() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = NetlifyClient::new("t")
            .unwrap()
            .with_base_url(format!("http://{}/api/v1", addr));

        assert!(client.list_custom_domains().await.is_empty());
    }
}
