//! hooksig Server - authenticates signed webhook deliveries.
//!
//! Every `POST` to the webhook path is verified against the shared signing
//! secret. Verified deliveries receive `200`, forged or tampered ones `403`,
//! and deliveries that arrive while no secret is configured `500`.
//!
//! # Usage
//!
//! ```text
//! CONTENTFUL_SIGNING_SECRET=... LISTEN_ADDR=0.0.0.0:8080 hooksig-server
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LISTEN_ADDR` | `0.0.0.0:8080` | Bind address |
//! | `CONTENTFUL_SIGNING_SECRET` | *(unset)* | Shared HMAC signing secret |
//! | `SIGNATURE_HEADER` | `x-contentful-signature` | Header carrying the digest |
//! | `SIGNED_HEADERS_HEADER` | `x-contentful-signed-headers` | Header carrying the directive |
//! | `WEBHOOK_PATH` | `/` | Path receiving deliveries |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

mod gateway;

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use hooksig_auth::{Secret, WebhookVerifier};
use hooksig_core::HookSigConfig;
use hooksig_http::{WebhookHttpConfig, WebhookHttpService};

use crate::gateway::GatewayService;

/// Server version reported at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

/// Build the [`WebhookHttpConfig`] from the application [`HookSigConfig`].
fn build_http_config(config: &HookSigConfig) -> WebhookHttpConfig {
    WebhookHttpConfig {
        signature_header: config.signature_header.clone(),
        signed_headers_header: config.signed_headers_header.clone(),
        webhook_path: config.webhook_path.clone(),
    }
}

/// Build the verifier from the configured secret.
///
/// An unset secret stays `None`; a set-but-empty one becomes an empty
/// [`Secret`]. Both make every verification report a configuration fault.
fn build_verifier(config: &HookSigConfig) -> WebhookVerifier {
    WebhookVerifier::new(config.signing_secret.clone().map(Secret::from))
}

/// Run the accept loop, serving connections until a shutdown signal is received.
async fn serve(listener: TcpListener, service: GatewayService) -> Result<()> {
    let graceful = hyper_util::server::graceful::GracefulShutdown::new();
    let http = HttpConnBuilder::new(TokioExecutor::new());

    let shutdown = async {
        tokio::signal::ctrl_c().await.ok();
        info!("received shutdown signal, draining connections");
    };

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = listener.accept() => {
                let (stream, peer_addr) = match result {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "failed to accept connection");
                        continue;
                    }
                };

                let svc = service.clone();
                let conn = http.serve_connection(TokioIo::new(stream), svc);
                let conn = graceful.watch(conn.into_owned());

                tokio::spawn(async move {
                    if let Err(e) = conn.await {
                        error!(peer_addr = %peer_addr, error = %e, "connection error");
                    }
                });
            }

            () = &mut shutdown => {
                info!("shutting down gracefully");
                break;
            }
        }
    }

    // Wait for in-flight requests to complete.
    graceful.shutdown().await;
    info!("all connections drained, exiting");

    Ok(())
}

/// Address the `--health-check` request connects to.
///
/// A wildcard bind address (`0.0.0.0` or `[::]`) is replaced by the loopback
/// address of the same family. Anything unparsable is returned unchanged so
/// the connect error names it.
fn health_check_addr(listen_addr: &str) -> String {
    match listen_addr.parse::<SocketAddr>() {
        Ok(mut addr) if addr.ip().is_unspecified() => {
            let loopback = match addr.ip() {
                IpAddr::V4(_) => IpAddr::V4(Ipv4Addr::LOCALHOST),
                IpAddr::V6(_) => IpAddr::V6(Ipv6Addr::LOCALHOST),
            };
            addr.set_ip(loopback);
            addr.to_string()
        }
        _ => listen_addr.to_owned(),
    }
}

/// Perform a health check by connecting to the server and requesting the health endpoint.
///
/// Succeeds only on a 200 response reporting the server as running.
async fn run_health_check(addr: &str) -> Result<()> {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    let stream = TcpStream::connect(addr)
        .await
        .with_context(|| format!("cannot connect to {addr}"))?;

    let (mut reader, mut writer) = stream.into_split();

    let request = format!("GET /health HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    writer.write_all(request.as_bytes()).await?;
    writer.shutdown().await?;

    let mut response = String::new();
    reader.read_to_string(&mut response).await?;

    if response.contains("200 OK") && response.contains("\"running\"") {
        Ok(())
    } else {
        anyhow::bail!("unhealthy response from {addr}")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = HookSigConfig::from_env();

    // Handle --health-check flag for container HEALTHCHECK.
    if std::env::args().any(|a| a == "--health-check") {
        let addr = health_check_addr(&config.listen_addr);
        let healthy = run_health_check(&addr).await.is_ok();
        std::process::exit(i32::from(!healthy));
    }

    init_tracing(&config.log_level)?;
    config.validate()?;

    let verifier = build_verifier(&config);
    if !verifier.has_secret() {
        warn!(
            "CONTENTFUL_SIGNING_SECRET is not set or empty; every delivery will be answered with 500"
        );
    }
    let secret_configured = verifier.has_secret();

    let webhook = WebhookHttpService::new(Arc::new(verifier), build_http_config(&config));
    let gateway = GatewayService::new(webhook, secret_configured);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("invalid bind address: {}", config.listen_addr))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(
        %addr,
        webhook_path = %config.webhook_path,
        signature_header = %config.signature_header,
        signed_headers_header = %config.signed_headers_header,
        secret_configured,
        version = VERSION,
        "starting hooksig server",
    );

    serve(listener, gateway).await
}
