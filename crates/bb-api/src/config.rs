//! Command-line and environment configuration.

use bb_auth::{AccessResolver, AuthError, AuthResolver, HttpAuthResolver, DEFAULT_NAMESPACE};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Blackboard server arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "blackboard")]
#[command(about = "General working memory for cooperating components")]
pub struct Config {
    /// Address the HTTP RPC surface listens on
    #[arg(short, long, env = "BLACKBOARD_LISTEN", default_value = "0.0.0.0:8002")]
    pub listen: SocketAddr,

    /// Namespace for calls without an auth token
    #[arg(long, env = "BLACKBOARD_DEFAULT_NAMESPACE", default_value = DEFAULT_NAMESPACE)]
    pub default_namespace: String,

    /// Token introspection URL; without it every token is its own namespace
    #[arg(long, env = "BLACKBOARD_AUTH_URL")]
    pub auth_url: Option<String>,

    /// Bearer key sent to the introspection endpoint
    #[arg(long, env = "BLACKBOARD_AUTH_KEY", hide_env_values = true)]
    pub auth_key: Option<String>,

    /// Introspection request timeout in milliseconds; a timeout counts as unresolved
    #[arg(long, env = "BLACKBOARD_AUTH_TIMEOUT_MS", default_value_t = 5000)]
    pub auth_timeout_ms: u64,

    /// PID file path (written best-effort)
    #[arg(
        long,
        env = "BLACKBOARD_PIDFILE",
        default_value = "/var/run/blackboard/pidfile.pid"
    )]
    pub pidfile: PathBuf,

    /// Do not write a PID file
    #[arg(long, default_value = "false")]
    pub no_pidfile: bool,
}

impl Config {
    pub fn access_resolver(&self) -> Result<AccessResolver, AuthError> {
        let auth = match self.auth_url {
            Some(ref url) => {
                let resolver = HttpAuthResolver::with_timeout(
                    url.clone(),
                    self.auth_key.clone(),
                    Duration::from_millis(self.auth_timeout_ms),
                )?;
                Some(Arc::new(resolver) as Arc<dyn AuthResolver + Send + Sync>)
            }
            None => None,
        };
        Ok(AccessResolver::new(auth).with_default_namespace(self.default_namespace.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cfg = Config::try_parse_from([
            "blackboard",
            "--listen",
            "127.0.0.1:9000",
            "--default-namespace",
            "lab",
            "--no-pidfile",
        ])
        .unwrap();
        assert_eq!(cfg.listen, "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(cfg.default_namespace, "lab");
        assert!(cfg.no_pidfile);
        assert_eq!(cfg.auth_timeout_ms, 5000);
        assert_eq!(cfg.access_resolver().unwrap().default_namespace(), "lab");
    }

    #[test]
    fn auth_url_builds_an_authenticated_resolver() {
        let cfg = Config::try_parse_from([
            "blackboard",
            "--auth-url",
            "http://127.0.0.1:9/introspect",
            "--auth-timeout-ms",
            "250",
        ])
        .unwrap();
        assert_eq!(cfg.auth_timeout_ms, 250);
        let access = cfg.access_resolver().unwrap();
        assert!(format!("{:?}", access).contains("authenticated: true"));
    }

    #[test]
    fn bad_listen_address_is_an_error() {
        assert!(Config::try_parse_from(["blackboard", "--listen", "not-an-addr"]).is_err());
    }
}
