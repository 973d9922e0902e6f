//! Stdio interaction host.
//!
//! Reads one JSON [`Interaction`] per line and writes one JSON [`Reply`] per
//! line. Interactions are handled in arrival order; stdout carries nothing
//! but replies.

use crate::dispatcher::Dispatcher;
use crate::error::Result;
use crate::models::{Interaction, Reply};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

/// Hosts a [`Dispatcher`] over a line-oriented JSON stream.
#[derive(Debug, Clone)]
pub struct BotServer {
    dispatcher: Dispatcher,
}

impl BotServer {
    /// Create a server around `dispatcher`.
    #[must_use]
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Serve stdin/stdout until stdin closes.
    ///
    /// # Errors
    ///
    /// Returns an error if reading stdin or writing stdout fails.
    pub async fn run(&self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        let handled = self.serve(stdin, stdout).await?;
        info!(handled, "Input closed, shutting down");
        Ok(())
    }

    /// Serve interactions from `reader`, writing replies to `writer`.
    ///
    /// Blank lines are skipped. A line that does not decode as an interaction
    /// gets an error reply and does not stop the loop.
    ///
    /// Returns the number of lines answered.
    ///
    /// # Errors
    ///
    /// Returns an error only for I/O failures on the streams.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<usize>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        let mut handled = 0;

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let reply = match serde_json::from_str::<Interaction>(line) {
                Ok(interaction) => {
                    debug!(command = %interaction.command, user = %interaction.user.id, "Interaction received");
                    self.dispatcher.handle(&interaction).await
                }
                Err(e) => {
                    warn!(error = %e, "Malformed interaction");
                    Reply::ephemeral(format!("Malformed interaction: {e}"))
                }
            };

            let mut encoded = serde_json::to_string(&reply)?;
            encoded.push('\n');
            writer.write_all(encoded.as_bytes()).await?;
            writer.flush().await?;
            handled += 1;
        }

        Ok(handled)
    }
}
