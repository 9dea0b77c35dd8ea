//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use seonaut_server::config::Environment;
use seonaut_server::http::middleware::SessionPresence;
use seonaut_server::lifecycle::{self, Shutdown};

/// A server running in the background on a loopback port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    handle: tokio::task::JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Trigger shutdown and wait for the server task to finish.
    pub async fn stop(self) {
        self.shutdown.trigger();
        let result = tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .expect("server did not stop in time");
        result.unwrap().unwrap();
    }
}

/// Start the server with `vars` as its environment and `config_path` as file hint.
///
/// The host and port are forced to an ephemeral loopback address.
pub async fn start_server(config_path: &Path, vars: &[(&str, &str)]) -> TestServer {
    let env: Environment = vars
        .iter()
        .copied()
        .chain([("SEONAUT_SERVER_HOST", "127.0.0.1"), ("PORT", "0")])
        .collect();

    let (server, listener) =
        lifecycle::start(config_path, &env, Arc::new(SessionPresence::default()))
            .await
            .unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(server.run(listener, server_shutdown));

    TestServer {
        addr,
        shutdown,
        handle,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
