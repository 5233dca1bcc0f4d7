//! The presence service capability and its Discord IPC implementation.

use crate::error::{Result, SystemError};
use discord_rich_presence::{activity, DiscordIpc, DiscordIpcClient};
use serde::{Deserialize, Serialize};

/// One presence update as sent to the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresenceUpdate {
    /// First line shown under the application name
    pub details: String,
    /// Second line
    pub state: String,
    pub large_image: String,
    pub large_text: String,
    pub small_text: String,
    /// Unix timestamp (seconds) the elapsed-time counter starts from
    pub start_timestamp: i64,
}

/// Connect, update and close operations offered by a presence host.
///
/// Every failure is an ordinary `SystemError::Presence`; callers decide
/// whether to retry.
pub trait PresenceClient {
    /// Perform the handshake for the given application id.
    fn connect(&mut self, client_id: &str) -> Result<()>;

    /// Replace the current presence.
    fn update(&mut self, update: &PresenceUpdate) -> Result<()>;

    /// Close the connection.
    fn close(&mut self) -> Result<()>;
}

/// Presence client talking to the local Discord desktop app over IPC.
#[derive(Default)]
pub struct DiscordClient {
    ipc: Option<DiscordIpcClient>,
}

impl DiscordClient {
    pub fn new() -> Self {
        Self::default()
    }
}

fn presence_error(err: Box<dyn std::error::Error>) -> SystemError {
    SystemError::presence_error(err.to_string())
}

impl PresenceClient for DiscordClient {
    fn connect(&mut self, client_id: &str) -> Result<()> {
        // A fresh IPC client per handshake; a stale socket is dropped here.
        let mut ipc = DiscordIpcClient::new(client_id).map_err(presence_error)?;
        ipc.connect().map_err(presence_error)?;
        self.ipc = Some(ipc);
        Ok(())
    }

    fn update(&mut self, update: &PresenceUpdate) -> Result<()> {
        let ipc = self
            .ipc
            .as_mut()
            .ok_or_else(|| SystemError::presence_error("not connected"))?;

        let payload = activity::Activity::new()
            .details(&update.details)
            .state(&update.state)
            .assets(
                activity::Assets::new()
                    .large_image(&update.large_image)
                    .large_text(&update.large_text)
                    .small_text(&update.small_text),
            )
            .timestamps(activity::Timestamps::new().start(update.start_timestamp));

        ipc.set_activity(payload).map_err(presence_error)
    }

    fn close(&mut self) -> Result<()> {
        match self.ipc.take() {
            Some(mut ipc) => ipc.close().map_err(presence_error),
            None => Ok(()),
        }
    }
}
