//! Local HTTPS development server.
//!
//! Serves a front-end directory over TLS with a PEM certificate and key, so
//! the request button has something to talk to on `localhost:4443`.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::Router;
use hyper::Request;
use hyper::body::Incoming;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto;
use rustls::ServerConfig;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;
use tower::ServiceExt;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::cli::ServeArgs;

const INDEX_FILE: &str = "index.html";

#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("missing certificate or private key (looked for `{}` and `{}`)", .cert.display(), .key.display())]
    MissingCertificate { cert: PathBuf, key: PathBuf },
    #[error("`{}` not found in the served directory", .0.display())]
    MissingIndex(PathBuf),
    #[error("failed to read `{}`: {source}", .path.display())]
    Pem { path: PathBuf, source: io::Error },
    #[error("no certificate found in `{}`", .0.display())]
    NoCertificate(PathBuf),
    #[error("no private key found in `{}`", .0.display())]
    NoPrivateKey(PathBuf),
    #[error("invalid TLS configuration: {0}")]
    Tls(#[from] rustls::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Check the files the server cannot start without.
pub fn check_layout(args: &ServeArgs) -> Result<(), ServeError> {
    if !(args.cert.exists() && args.key.exists()) {
        return Err(ServeError::MissingCertificate {
            cert: args.cert.clone(),
            key: args.key.clone(),
        });
    }

    let index = args.root.join(INDEX_FILE);
    if !index.exists() {
        return Err(ServeError::MissingIndex(index));
    }

    Ok(())
}

pub fn tls_config(cert: &Path, key: &Path) -> Result<ServerConfig, ServeError> {
    let certs = load_certs(cert)?;
    let key = load_private_key(key)?;

    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let mut config = ServerConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()?
        .with_no_client_auth()
        .with_single_cert(certs, key)?;
    config.alpn_protocols = vec![b"h2".to_vec(), b"http/1.1".to_vec()];

    Ok(config)
}

fn load_certs(path: &Path) -> Result<Vec<CertificateDer<'static>>, ServeError> {
    let mut reader = open_pem(path)?;
    let certs = rustls_pemfile::certs(&mut reader)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| ServeError::Pem {
            path: path.to_path_buf(),
            source,
        })?;

    if certs.is_empty() {
        return Err(ServeError::NoCertificate(path.to_path_buf()));
    }
    Ok(certs)
}

fn load_private_key(path: &Path) -> Result<PrivateKeyDer<'static>, ServeError> {
    let mut reader = open_pem(path)?;
    rustls_pemfile::private_key(&mut reader)
        .map_err(|source| ServeError::Pem {
            path: path.to_path_buf(),
            source,
        })?
        .ok_or_else(|| ServeError::NoPrivateKey(path.to_path_buf()))
}

fn open_pem(path: &Path) -> Result<BufReader<File>, ServeError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| ServeError::Pem {
            path: path.to_path_buf(),
            source,
        })
}

/// Static file router for `root`; directories resolve to their `index.html`.
pub fn router(root: &Path) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(root))
        .layer(TraceLayer::new_for_http())
}

pub async fn run(args: ServeArgs) -> Result<(), ServeError> {
    check_layout(&args)?;
    let acceptor = TlsAcceptor::from(Arc::new(tls_config(&args.cert, &args.key)?));
    let app = router(&args.root);

    let listener = TcpListener::bind((args.host.as_str(), args.port)).await?;
    info!("HTTPS server started on https://{}:{}", args.host, args.port);
    info!(root = %args.root.display(), "serving files");

    serve(listener, acceptor, app).await;
    Ok(())
}

/// Accept loop: one task per connection, TLS first, then HTTP/1.1 or HTTP/2.
pub async fn serve(listener: TcpListener, acceptor: TlsAcceptor, app: Router) {
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(err) => {
                warn!(error = %err, "failed to accept connection");
                continue;
            }
        };

        let acceptor = acceptor.clone();
        let app = app.clone();
        tokio::spawn(async move {
            let stream = match acceptor.accept(stream).await {
                Ok(stream) => stream,
                Err(err) => {
                    debug!(%peer, error = %err, "TLS handshake failed");
                    return;
                }
            };

            let service = hyper::service::service_fn(move |request: Request<Incoming>| app.clone().oneshot(request));

            if let Err(err) = auto::Builder::new(TokioExecutor::new())
                .serve_connection(TokioIo::new(stream), service)
                .await
            {
                debug!(%peer, error = %err, "connection closed with error");
            }
        });
    }
}
