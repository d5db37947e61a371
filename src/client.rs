use alloc::vec::Vec;
use core::fmt;

use anyhow::anyhow;
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;
use tokio::net::ToSocketAddrs;
use tokio::time::{sleep, Duration};

use crate::game::{Outcome, Registration, StatusReport};
use crate::layout::Layout;
use crate::pieces::PieceSet;
use crate::protocol::{Message, PROTOCOL_VERSION};
use crate::transport::{tcp::TcpTransport, Transport};

/// The server answered a request with a failure.
///
/// Carries the server's reason text ("too late", "overlap", ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerRejection(pub String);

impl fmt::Display for ServerRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ServerRejection {}

/// How an automated client's game ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayReport {
    pub registration: Registration,
    pub outcome: Outcome,
    pub shots: usize,
}

/// Client side of the match protocol over any [`Transport`].
pub struct MatchClient<T: Transport> {
    transport: T,
    handshaken: bool,
}

impl MatchClient<TcpTransport> {
    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        Ok(Self::new(TcpTransport::connect(addr).await?))
    }
}

impl<T: Transport> MatchClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            handshaken: false,
        }
    }

    async fn ensure_handshake(&mut self) -> anyhow::Result<()> {
        if self.handshaken {
            return Ok(());
        }
        self.transport
            .send(Message::Handshake {
                version: PROTOCOL_VERSION,
            })
            .await?;
        match self.transport.recv().await? {
            Message::HandshakeAck { version } if version == PROTOCOL_VERSION => {
                self.handshaken = true;
                Ok(())
            }
            Message::HandshakeAck { version } => Err(anyhow!(
                "Protocol version mismatch in HandshakeAck: expected {}, got {}",
                PROTOCOL_VERSION,
                version
            )),
            Message::Failure { result } => Err(ServerRejection(result).into()),
            other => Err(anyhow!("Expected HandshakeAck, got {:?}", other)),
        }
    }

    async fn request(&mut self, msg: Message) -> anyhow::Result<Message> {
        self.ensure_handshake().await?;
        self.transport.send(msg).await?;
        match self.transport.recv().await? {
            Message::Failure { result } => Err(ServerRejection(result).into()),
            reply => Ok(reply),
        }
    }

    pub async fn register(&mut self) -> anyhow::Result<Registration> {
        match self.request(Message::Register).await? {
            Message::Registered(registration) => Ok(registration),
            other => Err(anyhow!("Expected Registered, got {:?}", other)),
        }
    }

    pub async fn status(&mut self) -> anyhow::Result<StatusReport> {
        match self.request(Message::Status).await? {
            Message::StatusResp(report) => Ok(report),
            other => Err(anyhow!("Expected StatusResp, got {:?}", other)),
        }
    }

    pub async fn submit_layout(
        &mut self,
        animal: &str,
        positions: Option<Layout>,
    ) -> anyhow::Result<String> {
        let msg = Message::Layout {
            animal: animal.to_string(),
            positions,
        };
        self.expect_done(msg).await
    }

    pub async fn shoot(&mut self, x: i64, y: i64) -> anyhow::Result<String> {
        self.expect_done(Message::Shot { x, y }).await
    }

    pub async fn reset(&mut self) -> anyhow::Result<String> {
        self.expect_done(Message::Reset).await
    }

    async fn expect_done(&mut self, msg: Message) -> anyhow::Result<String> {
        match self.request(msg).await? {
            Message::Done { result } => Ok(result),
            other => Err(anyhow!("Expected Done, got {:?}", other)),
        }
    }

    /// Play a whole match automatically: register, place a random layout,
    /// then fire at every cell in random order until the match is decided.
    pub async fn play_out<R: Rng>(&mut self, rng: &mut R, poll: Duration) -> anyhow::Result<PlayReport> {
        let registration = self.register().await?;
        let animal = registration.role.name();
        info!("playing as {}", animal);

        let pieces = PieceSet::new(registration.pieces.clone());
        let layout = Layout::random(rng, &pieces).map_err(|e| anyhow!(e))?;
        self.submit_layout(animal, Some(layout)).await?;

        let (width, height) = registration.board;
        let mut targets: Vec<(i64, i64)> = (0..height as i64)
            .flat_map(|y| (0..width as i64).map(move |x| (x, y)))
            .collect();
        targets.shuffle(rng);

        let mut shots = 0;
        loop {
            match self.status().await? {
                StatusReport::Finished(outcome) => {
                    info!("{}: {}", animal, outcome);
                    return Ok(PlayReport {
                        registration,
                        outcome,
                        shots,
                    });
                }
                StatusReport::Live(_) => {
                    let Some((x, y)) = targets.pop() else {
                        return Err(anyhow!("Every cell fired upon but the match is undecided"));
                    };
                    match self.shoot(x, y).await {
                        Ok(result) => {
                            shots += 1;
                            debug!("{} fired at ({}, {}): {}", animal, x, y, result);
                        }
                        // The opponent finished the match between our status and shot.
                        Err(e) if e.downcast_ref::<ServerRejection>().is_some() => {
                            debug!("{} shot refused: {}", animal, e);
                        }
                        Err(e) => return Err(e),
                    }
                }
                StatusReport::Waiting(waiting) => {
                    debug!("{} waiting for {}", animal, waiting.as_str());
                    sleep(poll).await;
                }
            }
        }
    }
}
