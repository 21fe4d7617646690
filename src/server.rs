use std::{fs, io::ErrorKind, os::unix::fs::FileTypeExt, path::Path, sync::Arc};

use anyhow::{Context, Result, bail};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::{UnixListener, UnixStream},
    signal::unix::{SignalKind, signal},
    sync::mpsc,
};

use crate::{
    config::ServerConfig,
    ethics::{
        EthicsFacade, OutputContract,
        error::{internal_error, invalid_request},
    },
    protocol::{ClientMessage, ServerMessage, encode_server_message, parse_client_message},
};

enum ExitReason {
    SocketMessage,
    Signal(&'static str),
}

#[derive(Clone)]
struct Session {
    facade: Arc<EthicsFacade>,
    contract: Option<Arc<OutputContract>>,
    exit_tx: mpsc::UnboundedSender<()>,
}

pub async fn run(config: ServerConfig, facade: Arc<EthicsFacade>) -> Result<()> {
    let contract = if config.validate_output {
        Some(Arc::new(OutputContract::new()?))
    } else {
        None
    };

    prepare_socket_path(&config.socket_path)?;
    let listener = UnixListener::bind(&config.socket_path)
        .with_context(|| format!("unable to bind socket {}", config.socket_path.display()))?;

    let mut sigint =
        signal(SignalKind::interrupt()).context("unable to listen for SIGINT (Ctrl+C)")?;
    let mut sigterm = signal(SignalKind::terminate()).context("unable to listen for SIGTERM")?;
    let (exit_tx, mut exit_rx) = mpsc::unbounded_channel::<()>();

    tracing::info!(
        target: "server",
        socket_path = %config.socket_path.display(),
        validate_output = config.validate_output,
        "server_listening"
    );

    let session = Session {
        facade,
        contract,
        exit_tx,
    };

    let exit_reason = loop {
        tokio::select! {
            _ = sigint.recv() => break ExitReason::Signal("SIGINT"),
            _ = sigterm.recv() => break ExitReason::Signal("SIGTERM"),
            Some(()) = exit_rx.recv() => break ExitReason::SocketMessage,
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, _)) => {
                        tracing::debug!(target: "server", "client_connected");
                        let session = session.clone();
                        tokio::spawn(async move {
                            if let Err(err) = handle_client(stream, session).await {
                                tracing::warn!(target: "server", error = %format!("{err:#}"), "client_failed");
                            }
                        });
                    }
                    Err(err) => {
                        tracing::warn!(target: "server", error = %err, "accept_failed");
                    }
                }
            }
        }
    };

    cleanup_socket_path(&config.socket_path)?;
    match exit_reason {
        ExitReason::SocketMessage => {
            tracing::info!(target: "server", reason = "exit_message", "server_stopped")
        }
        ExitReason::Signal(signal_name) => {
            tracing::info!(target: "server", reason = signal_name, "server_stopped")
        }
    }

    Ok(())
}

async fn handle_client(stream: UnixStream, session: Session) -> Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let reply = match parse_client_message(line) {
            Ok(ClientMessage::Exit) => {
                let _ = session.exit_tx.send(());
                break;
            }
            Ok(ClientMessage::Evaluate {
                request_id,
                request,
            }) => evaluate(&session, request_id, request),
            Err(err) => {
                tracing::warn!(
                    target: "server",
                    request_id = ?err.request_id,
                    error = %err,
                    "invalid_protocol_message"
                );
                let error = invalid_request(format!("invalid protocol message: {err}"));
                ServerMessage::Error {
                    request_id: err.request_id,
                    error,
                }
            }
        };

        let encoded = encode_server_message(&reply).context("failed to encode reply")?;
        writer
            .write_all(encoded.as_bytes())
            .await
            .context("failed to write reply")?;
        writer.flush().await.context("failed to flush reply")?;
    }

    Ok(())
}

fn evaluate(
    session: &Session,
    request_id: String,
    request: crate::ethics::EvaluationRequest,
) -> ServerMessage {
    let outcome = match session.facade.evaluate_request(&request_id, request) {
        Ok(outcome) => outcome,
        Err(error) => {
            return ServerMessage::Error {
                request_id: Some(request_id),
                error,
            };
        }
    };

    if let Some(contract) = session.contract.as_ref()
        && let Err(err) = contract.check(&outcome)
    {
        tracing::error!(
            target: "server",
            request_id = %request_id,
            error = %format!("{err:#}"),
            "output_contract_violation"
        );
        return ServerMessage::Error {
            request_id: Some(request_id),
            error: internal_error(format!("{err:#}")),
        };
    }

    ServerMessage::Outcome {
        request_id,
        outcome,
    }
}

fn prepare_socket_path(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("unable to create {}", parent.display()))?;
    }

    match fs::symlink_metadata(path) {
        Ok(metadata) => {
            if metadata.file_type().is_socket() || metadata.is_file() {
                fs::remove_file(path)
                    .with_context(|| format!("unable to remove stale socket {}", path.display()))?;
            } else {
                bail!(
                    "socket path exists but is not removable as file/socket: {}",
                    path.display()
                );
            }
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err).with_context(|| format!("unable to inspect {}", path.display()));
        }
    }

    Ok(())
}

fn cleanup_socket_path(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(_) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err).with_context(|| format!("unable to remove {}", path.display())),
    }
}
