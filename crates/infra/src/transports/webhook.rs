use super::IMessageTransport;
use klaxon_domain::RenderedMessage;
use serde::Serialize;

/// Posts rendered messages to an HTTP gateway that owns the actual
/// provider integration (SMTP relay, SMS broker, ...)
pub struct WebhookMessageTransport {
    client: reqwest::Client,
    url: String,
    key: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WebhookMessageBody<'a> {
    address: &'a str,
    subject: &'a str,
    body: &'a str,
}

impl WebhookMessageTransport {
    pub fn new(url: String, key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            key,
        }
    }
}

#[async_trait::async_trait]
impl IMessageTransport for WebhookMessageTransport {
    async fn send(&self, address: &str, message: &RenderedMessage) -> anyhow::Result<()> {
        let mut req = self.client.post(&self.url).json(&WebhookMessageBody {
            address,
            subject: &message.subject,
            body: &message.body,
        });
        if let Some(key) = &self.key {
            req = req.header("klaxon-webhook-key", key);
        }

        req.send().await?.error_for_status()?;
        Ok(())
    }
}
