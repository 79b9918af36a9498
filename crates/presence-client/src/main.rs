//! Presence client over stdio
//!
//! Run with:
//! ```bash
//! PRESENCE_PARTICIPANT_ID=<uuid> cargo run -p presence-client
//! ```
//!
//! Reads one JSON frame per line from stdin and writes outbound frames to
//! stdout, one per line. Lines starting with `/` are local commands:
//! `/status <text>`, `/availability <open|dnd|unset>`, and `/who`.
//! Configuration is loaded from environment variables.

use presence_client::{ChannelTransport, Frame, PresenceClient, PresenceClientBuilder};
use presence_common::{try_init_tracing, AppError, AppResult, ClientConfig, TracingConfig};
use presence_core::Availability;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let config = ClientConfig::from_env();

    let tracing_config = config
        .as_ref()
        .map(|c| {
            let preset = TracingConfig::for_environment(c.app.env);
            match c.app.log_format {
                Some(format) => preset.with_format(format),
                None => preset,
            }
        })
        .unwrap_or_default();
    if let Err(e) = try_init_tracing(&tracing_config) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    let result = match config {
        Ok(config) => run(config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        error!(error = %e, code = e.error_code(), "Presence client failed");
        std::process::exit(1);
    }
}

async fn run(config: ClientConfig) -> AppResult<()> {
    info!(
        app = %config.app.name,
        env = ?config.app.env,
        persist_state = config.presence.persist_state,
        "Configuration loaded"
    );

    let (transport, outbound) = ChannelTransport::new(config.presence.outbound_buffer);
    let client = PresenceClientBuilder::from_config(&config)
        .transport(Arc::new(transport))
        .build()
        .await?;

    client.on_join_notice(|notice| {
        info!(
            status = %notice.own_state.status,
            availability = %notice.own_state.availability,
            "Joined session; set your status with /status and /availability"
        );
    });

    let writer = tokio::spawn(write_frames(outbound));

    client.on_connect();
    let read_result = read_lines(&client).await;
    client.on_disconnect();

    // Dropping the client closes the outbound channel so the writer drains and exits
    client.shutdown().await;
    match writer.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!(error = %e, "Failed writing outbound frames"),
        Err(e) => warn!(error = %e, "Frame writer ended abnormally"),
    }

    read_result
}

async fn read_lines(client: &PresenceClient) -> AppResult<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.map_err(AppError::internal)? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(command) = line.strip_prefix('/') {
            handle_command(client, command);
            continue;
        }

        match Frame::from_json(line) {
            // Rejections are logged by the reconciler
            Ok(frame) => {
                let _ = client.handle_frame(&frame);
            }
            Err(e) => warn!(error = %e, "Discarding malformed line"),
        }
    }

    info!("Input closed");
    Ok(())
}

fn handle_command(client: &PresenceClient, command: &str) {
    let (name, arg) = command
        .split_once(' ')
        .map_or((command, ""), |(name, arg)| (name, arg.trim()));

    match name {
        "status" => {
            let state = client.set_own_status(arg);
            info!(status = %state.status, "Status set");
        }
        "availability" => match arg.parse::<Availability>() {
            Ok(availability) => {
                client.set_own_availability(availability);
                info!(%availability, "Availability set");
            }
            Err(e) => warn!(error = %e, "Unknown availability"),
        },
        "who" => {
            for (id, state) in client.remote_states() {
                info!(
                    participant_id = %id,
                    status = %state.status,
                    availability = %state.availability,
                    "Remote presence"
                );
            }
        }
        other => warn!(command = other, "Unknown command"),
    }
}

async fn write_frames(mut outbound: mpsc::Receiver<Frame>) -> std::io::Result<()> {
    let mut stdout = tokio::io::stdout();

    while let Some(frame) = outbound.recv().await {
        match frame.to_json() {
            Ok(json) => {
                stdout.write_all(json.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
            Err(e) => warn!(error = %e, "Failed to encode outbound frame"),
        }
    }

    Ok(())
}
