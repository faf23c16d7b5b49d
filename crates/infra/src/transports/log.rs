use super::IMessageTransport;
use klaxon_domain::RenderedMessage;
use tracing::info;

/// Fallback used when no gateway is configured: messages are written to
/// the log and count as delivered. Useful for development and for
/// deployments that only care about the in-app channel.
pub struct LogMessageTransport {
    channel: &'static str,
}

impl LogMessageTransport {
    pub fn new(channel: &'static str) -> Self {
        Self { channel }
    }
}

#[async_trait::async_trait]
impl IMessageTransport for LogMessageTransport {
    async fn send(&self, address: &str, message: &RenderedMessage) -> anyhow::Result<()> {
        info!(
            "[{}] to {}: {} / {}",
            self.channel, address, message.subject, message.body
        );
        Ok(())
    }
}
