use clap::Parser;
use libsubprobe::{ProbeConfig, DEFAULT_PARENT_DOMAIN};
use std::{net::SocketAddr, time::Duration};
use thiserror::Error;

pub const ACCESS_KEY_VAR: &str = "NETLIFY_ACCESS_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set; export it or put it in .env")]
    MissingAccessKey(&'static str),
    #[error("Probe timeout must be at least one second")]
    ZeroTimeout,
    #[error("Invalid parent domain: {0:?}")]
    InvalidDomain(String),
}

#[derive(Parser, Debug)]
#[command(name = "subcheck", version)]
#[command(about = "Check if a subdomain is available under fosscu.org", long_about = None)]
pub struct Args {
    /// Address to serve the API on
    #[arg(long, env = "SUBCHECK_BIND", default_value = "0.0.0.0:8020")]
    pub bind: SocketAddr,

    /// Parent domain candidate subdomains are checked under
    #[arg(long, env = "SUBCHECK_DOMAIN", default_value = DEFAULT_PARENT_DOMAIN)]
    pub domain: String,

    /// Per-probe timeout in seconds
    #[arg(long, env = "SUBCHECK_TIMEOUT", default_value_t = 5)]
    pub timeout: u64,

    /// Netlify personal access token
    #[arg(long, env = ACCESS_KEY_VAR, hide_env_values = true)]
    pub access_key: Option<String>,

    /// Print the account's sites with custom domains as JSON and exit
    #[arg(long)]
    pub list_sites: bool,

    /// Debug-level logging for the service crates
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// Process-wide settings, built once at startup and passed down explicitly.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind: SocketAddr,
    pub parent_domain: String,
    pub access_key: String,
    pub probe: ProbeConfig,
}

impl AppConfig {
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let access_key = args
            .access_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingAccessKey(ACCESS_KEY_VAR))?
            .to_string();

        if args.timeout == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let parent_domain = args.domain.trim().trim_matches('.').to_lowercase();
        if parent_domain.is_empty() || parent_domain.contains(['/', ' ', ':']) {
            return Err(ConfigError::InvalidDomain(args.domain.clone()));
        }

        Ok(Self {
            bind: args.bind,
            parent_domain,
            access_key,
            probe: ProbeConfig {
                timeout: Duration::from_secs(args.timeout),
                ..ProbeConfig::default()
            },
        })
    }
}
