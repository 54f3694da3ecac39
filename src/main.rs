use anyhow::{bail, Context, Result};
use axum::{serve, Router};
use bg95_hub::core::config::Config;
use bg95_hub::core::startup::bootstrap;
use bg95_hub::core::tracing_init::init_tracing;
use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tokio::net::{TcpListener, UnixListener};
use tokio::signal;
use tokio::task::JoinHandle;
use tower::Service;
use tracing::{error, info};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let config_path = if args.len() > 1 {
        PathBuf::from(&args[1])
    } else {
        PathBuf::from("config.toml")
    };

    // Load and validate configuration
    let config = Config::from_file(&config_path).context(format!(
        "Failed to load configuration from '{}'. \
        If this is your first run, copy config.example.toml to config.toml and adjust the values.",
        config_path.display()
    ))?;

    init_tracing(&config.logging)?;

    // Build Tokio runtime with configured number of threads
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.num_threads)
        .enable_all()
        .build()
        .context("Failed to build Tokio runtime")?;

    runtime.block_on(async_main(config, config_path))
}

async fn async_main(config: Config, config_path: PathBuf) -> Result<()> {
    info!(
        config_path = %config_path.display(),
        port = ?config.server.port,
        unix_socket = ?config.server.unix_socket,
        num_threads = config.server.num_threads,
        log_level = %config.logging.level,
        log_format = %config.logging.format,
        "{} starting",
        env!("CARGO_PKG_NAME")
    );

    let port = config.server.port;
    let unix_socket = config.server.unix_socket.clone();

    let (_state, app) = bootstrap(config)?;

    let tcp_handle = match port {
        Some(port) => Some(spawn_tcp(port, app.clone()).await?),
        None => None,
    };

    let unix_handle = match &unix_socket {
        Some(path) => Some(spawn_unix(path, app)?),
        None => None,
    };

    info!("HTTP server(s) started, waiting for shutdown signal");

    // Wait for both servers to complete (if they exist)
    match (tcp_handle, unix_handle) {
        (Some(tcp), Some(unix)) => {
            tokio::select! {
                result = tcp => log_server_exit("TCP", result),
                _ = unix => info!("Unix socket listener stopped"),
            }
        }
        (Some(tcp), None) => log_server_exit("TCP", tcp.await),
        (None, Some(unix)) => {
            // The accept loop never finishes on its own
            tokio::select! {
                _ = unix => {}
                _ = shutdown_signal() => {}
            }
        }
        (None, None) => {
            error!("No listeners configured");
            bail!("No listeners configured");
        }
    }

    if let Some(path) = unix_socket.filter(|p| p.exists()) {
        if let Err(e) = std::fs::remove_file(&path) {
            error!(path = %path.display(), error = %e, "Failed to remove Unix socket");
        }
    }

    info!("Shutting down gracefully");

    Ok(())
}

async fn spawn_tcp(port: u16, app: Router) -> Result<JoinHandle<Result<()>>> {
    let addr = format!("0.0.0.0:{}", port);
    info!(address = %addr, "Starting TCP listener");

    let listener = TcpListener::bind(&addr)
        .await
        .context(format!("Failed to bind TCP listener to {}", addr))?;

    info!(address = %addr, "TCP listener bound successfully");

    Ok(tokio::spawn(async move {
        serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("TCP server error")
    }))
}

fn spawn_unix(path: &Path, app: Router) -> Result<JoinHandle<()>> {
    info!(path = %path.display(), "Starting Unix socket listener");

    // Remove a stale socket file left by a previous run
    if path.exists() {
        std::fs::remove_file(path)
            .context(format!("Failed to remove existing Unix socket: {}", path.display()))?;
    }

    let listener = UnixListener::bind(path)
        .context(format!("Failed to bind Unix socket listener to {}", path.display()))?;

    info!(path = %path.display(), "Unix socket listener bound successfully");

    let mut make_service = app.into_make_service();
    Ok(tokio::spawn(async move {
        loop {
            let (socket, _remote_addr) = match listener.accept().await {
                Ok(conn) => conn,
                Err(e) => {
                    error!(error = %e, "Failed to accept Unix socket connection");
                    continue;
                }
            };

            let tower_service = match make_service.call(&socket).await {
                Ok(svc) => svc,
                Err(infallible) => match infallible {},
            };

            tokio::spawn(async move {
                let socket = hyper_util::rt::TokioIo::new(socket);

                let hyper_service = hyper::service::service_fn(
                    move |request: hyper::Request<hyper::body::Incoming>| {
                        tower_service.clone().call(request)
                    },
                );

                if let Err(err) = hyper_util::server::conn::auto::Builder::new(
                    hyper_util::rt::TokioExecutor::new(),
                )
                .serve_connection_with_upgrades(socket, hyper_service)
                .await
                {
                    error!(error = %err, "Error serving Unix socket connection");
                }
            });
        }
    }))
}

fn log_server_exit(kind: &str, result: Result<Result<()>, tokio::task::JoinError>) {
    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!(error = %e, "{} server error", kind),
        Err(e) => error!(error = %e, "{} server task failed", kind),
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
