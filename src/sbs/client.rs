//! TCP feed client - connects to a BaseStation socket and posts decoded
//! updates into the event loop
//!
//! The client is the only concurrent producer in the program. It never
//! touches the tracker or the view; it only sends immutable messages over
//! the channel and a terminal `Lost` event when the connection dies.
//! Reconnect policy belongs to whoever restarts the task, not here.

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::parser::{parse_line, SbsMessage};

/// What the feed task posts to the consuming event loop.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    Message(SbsMessage),
    Lost(String),
}

/// Connect and pump the feed until EOF, error, or a closed channel.
pub async fn run_feed(addr: String, tx: mpsc::Sender<FeedEvent>) {
    info!("Connecting to SBS feed at {}", addr);

    let stream = match TcpStream::connect(&addr).await {
        Ok(stream) => stream,
        Err(e) => {
            warn!("SBS connect failed: {}", e);
            let _ = tx.send(FeedEvent::Lost(format!("connect {addr}: {e}"))).await;
            return;
        }
    };

    info!("SBS feed connected");
    let reader = BufReader::new(stream);
    let mut lines = reader.lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if let Some(msg) = parse_line(&line) {
                    if tx.send(FeedEvent::Message(msg)).await.is_err() {
                        debug!("Event channel closed, stopping feed client");
                        return;
                    }
                }
            }
            Ok(None) => {
                info!("SBS feed closed by remote");
                let _ = tx.send(FeedEvent::Lost("feed disconnected".to_string())).await;
                return;
            }
            Err(e) => {
                warn!("SBS read error: {}", e);
                let _ = tx.send(FeedEvent::Lost(format!("read: {e}"))).await;
                return;
            }
        }
    }
}
