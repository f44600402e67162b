//! WebSocket session owning the connection to the relay.

use futures_util::{SinkExt, StreamExt, stream::SplitSink};
use tokio::{net::TcpStream, sync::mpsc, task::JoinHandle};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

use codesync_shared::protocol::{ClientEvent, ServerEvent};

use crate::error::ClientError;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// What the read task observed on the socket
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Event(ServerEvent),
    /// A text frame that does not decode as a [`ServerEvent`]
    Malformed(String),
    /// The relay closed the connection
    Closed,
    /// The transport failed while reading
    Failed(String),
}

/// An open connection to the relay.
///
/// Outgoing events go through [`Session::emit`]; incoming frames are decoded
/// by a background task and read with [`Session::next_event`]. Dropping the
/// session aborts the read task, [`Session::close`] also sends a close frame.
pub struct Session {
    writer: SplitSink<WsStream, Message>,
    events: mpsc::UnboundedReceiver<SessionEvent>,
    read_task: JoinHandle<()>,
}

impl Session {
    /// Open a WebSocket connection to `url`
    pub async fn connect(url: &str) -> Result<Self, ClientError> {
        let (ws_stream, _response) = connect_async(url)
            .await
            .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
        tracing::info!("Connected to relay at {}", url);

        let (writer, mut reader) = ws_stream.split();
        let (tx, events) = mpsc::unbounded_channel();

        let read_task = tokio::spawn(async move {
            while let Some(message) = reader.next().await {
                let event = match message {
                    Ok(Message::Text(text)) => match ServerEvent::from_json(text.as_str()) {
                        Ok(event) => SessionEvent::Event(event),
                        Err(e) => {
                            tracing::warn!("Failed to decode event: {}", e);
                            SessionEvent::Malformed(text.as_str().to_string())
                        }
                    },
                    Ok(Message::Close(_)) => {
                        tracing::info!("Relay closed the connection");
                        let _ = tx.send(SessionEvent::Closed);
                        return;
                    }
                    Err(e) => {
                        tracing::warn!("WebSocket read error: {}", e);
                        let _ = tx.send(SessionEvent::Failed(e.to_string()));
                        return;
                    }
                    _ => continue,
                };
                if tx.send(event).is_err() {
                    return;
                }
            }
            let _ = tx.send(SessionEvent::Closed);
        });

        Ok(Self {
            writer,
            events,
            read_task,
        })
    }

    /// Send one event to the relay
    pub async fn emit(&mut self, event: &ClientEvent) -> Result<(), ClientError> {
        let json = event.to_json()?;
        self.writer
            .send(Message::Text(json.into()))
            .await
            .map_err(|e| ClientError::TransportError(e.to_string()))
    }

    /// Next decoded frame, `None` once the read task has stopped
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.events.recv().await
    }

    /// Close the transport; the relay treats this as leaving the room
    pub async fn close(mut self) -> Result<(), ClientError> {
        self.writer
            .close()
            .await
            .map_err(|e| ClientError::TransportError(e.to_string()))
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.read_task.abort();
    }
}
