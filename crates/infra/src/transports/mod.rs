mod log;
mod webhook;

pub use log::LogMessageTransport;
pub use webhook::WebhookMessageTransport;

use klaxon_domain::RenderedMessage;

/// Outbound handoff for channels that leave the process (email, SMS).
///
/// Implementations deliver one rendered message to one address. The error
/// is the failure reason and ends up verbatim in the delivery log.
#[async_trait::async_trait]
pub trait IMessageTransport: Send + Sync {
    async fn send(&self, address: &str, message: &RenderedMessage) -> anyhow::Result<()>;
}
