use anyhow::anyhow;
use log::{debug, info, warn};
use tokio::net::TcpListener;
use tokio::time::Duration;

use crate::common::IdentityKey;
use crate::protocol::{Message, PROTOCOL_VERSION};
use crate::shared::SharedMatch;
use crate::transport::{tcp::TcpTransport, Transport};

/// Serves one match to every connection, keyed by peer address.
#[derive(Clone, Default)]
pub struct MatchServer {
    game: SharedMatch,
}

impl MatchServer {
    pub fn new(game: SharedMatch) -> Self {
        Self { game }
    }

    pub fn game(&self) -> &SharedMatch {
        &self.game
    }

    /// Accept connections forever, one task per connection.
    ///
    /// The identity is the peer IP; the port is ignored so a client that
    /// reconnects keeps its role.
    pub async fn run(self, listener: TcpListener, idle_timeout: Duration) -> anyhow::Result<()> {
        loop {
            let (stream, addr) = listener.accept().await?;
            let identity = IdentityKey::from(addr.ip());
            info!("connection from {}", addr);
            let server = self.clone();
            tokio::spawn(async move {
                let transport = TcpTransport::with_timeout(stream, idle_timeout);
                if let Err(e) = server.serve(transport, identity).await {
                    warn!("session with {} ended: {}", addr, e);
                }
            });
        }
    }

    /// Run one session: handshake, then answer requests until the peer leaves.
    pub async fn serve<T: Transport>(
        &self,
        mut transport: T,
        identity: IdentityKey,
    ) -> anyhow::Result<()> {
        match transport.recv().await? {
            Message::Handshake { version } if version == PROTOCOL_VERSION => {
                transport
                    .send(Message::HandshakeAck {
                        version: PROTOCOL_VERSION,
                    })
                    .await?;
            }
            Message::Handshake { version } => {
                let result = format!(
                    "Protocol version mismatch: expected {}, got {}",
                    PROTOCOL_VERSION, version
                );
                transport
                    .send(Message::Failure {
                        result: result.clone(),
                    })
                    .await?;
                return Err(anyhow!(result));
            }
            other => {
                return Err(anyhow!("Expected Handshake, got {:?} (closing session)", other));
            }
        }

        loop {
            let msg = match transport.recv().await {
                Ok(msg) => msg,
                Err(e) => {
                    debug!("{} disconnected: {}", identity, e);
                    return Ok(());
                }
            };
            let reply = self.dispatch(&identity, msg);
            transport.send(reply).await?;
        }
    }

    /// Answer a single request on behalf of `identity`.
    pub fn dispatch(&self, identity: &IdentityKey, msg: Message) -> Message {
        let reply = match msg {
            Message::Register => self
                .game
                .register(identity.clone())
                .map(Message::Registered),
            Message::Status => self.game.status(identity).map(Message::StatusResp),
            Message::Layout { animal, positions } => self
                .game
                .submit_layout(identity, &animal, positions.as_ref())
                .map(|accepted| Message::Done {
                    result: accepted.to_string(),
                }),
            Message::Shot { x, y } => {
                self.game
                    .submit_shot(identity, (x, y))
                    .map(|shot| Message::Done {
                        result: shot.to_string(),
                    })
            }
            Message::Reset => self.game.reset_by(identity).map(|()| Message::Done {
                result: "match reset".to_string(),
            }),
            other => {
                return Message::Failure {
                    result: format!("Unexpected request: {:?}", other),
                }
            }
        };
        reply.unwrap_or_else(|e| {
            debug!("{}: {}", identity, e);
            Message::Failure {
                result: e.to_string(),
            }
        })
    }
}
