//! The accept loop: binds the listening socket, optionally wraps each
//! accepted connection in TLS, and spawns a connection task per client.

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio_rustls::rustls::pki_types::{CertificateDer, PrivateKeyDer};
use tokio_rustls::rustls::ServerConfig;
use tokio_rustls::TlsAcceptor;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::ServerError;
use crate::network::connection;
use crate::state::Service;

/// Parse a server address of the form `[host]:port`, defaulting the
/// host to all interfaces when empty (matching `:6697`-style
/// reference addresses).
fn to_socket_addr(address: &str) -> String {
    if let Some(stripped) = address.strip_prefix(':') {
        format!("0.0.0.0:{stripped}")
    } else {
        address.to_string()
    }
}

fn load_tls_acceptor(config: &Config, service: &Service) -> Result<TlsAcceptor, ServerError> {
    let (cert_pem, key_pem) = match (&config.cert_path, &config.key_path) {
        (Some(cert_path), Some(key_path)) => (
            std::fs::read(cert_path)?,
            std::fs::read(key_path)?,
        ),
        _ => service
            .store
            .cert_and_key()?
            .ok_or_else(|| ServerError::Tls("no certificate/key in credential store".to_string()))?,
    };

    let certs: Vec<CertificateDer<'static>> = rustls_pemfile::certs(&mut cert_pem.as_slice())
        .collect::<Result<_, _>>()
        .map_err(|e| ServerError::Tls(e.to_string()))?;
    let key = rustls_pemfile::private_key(&mut key_pem.as_slice())
        .map_err(|e| ServerError::Tls(e.to_string()))?
        .ok_or_else(|| ServerError::Tls("no private key found in key file".to_string()))?;

    let tls_config = ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key_into_owned(key))
        .map_err(|e| ServerError::Tls(e.to_string()))?;

    Ok(TlsAcceptor::from(Arc::new(tls_config)))
}

fn key_into_owned(key: PrivateKeyDer<'_>) -> PrivateKeyDer<'static> {
    key.clone_key()
}

/// Bind the listener and accept connections forever, spawning one task
/// per connection. Returns only on a fatal bind error.
pub async fn serve(config: Config, service: Arc<Service>) -> Result<(), ServerError> {
    let acceptor = if config.insecure {
        None
    } else {
        Some(load_tls_acceptor(&config, &service)?)
    };

    let bind_addr = to_socket_addr(&config.address);
    let listener = TcpListener::bind(&bind_addr).await?;
    info!(address = %bind_addr, tls = acceptor.is_some(), "listening");

    loop {
        let (stream, addr) = match listener.accept().await {
            Ok(pair) => pair,
            Err(e) => {
                warn!(error = %e, "accept failed");
                continue;
            }
        };

        let service = service.clone();
        let acceptor = acceptor.clone();

        tokio::spawn(async move {
            let result = match acceptor {
                Some(acceptor) => match acceptor.accept(stream).await {
                    Ok(tls_stream) => connection::run(Box::new(tls_stream), addr, service).await,
                    Err(e) => {
                        warn!(error = %e, %addr, "tls handshake failed");
                        return;
                    }
                },
                None => connection::run(Box::new(stream), addr, service).await,
            };
            if let Err(e) = result {
                warn!(error = %e, %addr, "connection ended with error");
            }
        });
    }
}
