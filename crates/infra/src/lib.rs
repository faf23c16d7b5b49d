mod channels;
mod config;
mod locks;
mod repos;
mod system;
mod transports;

pub use channels::Channels;
pub use config::Config;
pub use locks::PreferenceLocks;
pub use repos::{
    IAlertRepo, IDeliveryRepo, IInboxRepo, IPreferenceRepo, ITeamRepo, IUserRepo,
    InMemoryAlertRepo, InMemoryDeliveryRepo, InMemoryInboxRepo, InMemoryPreferenceRepo,
    InMemoryTeamRepo, InMemoryUserRepo, Repos,
};
use std::sync::Arc;
pub use system::{FixedTimeSys, ISys, RealSys};
pub use transports::{IMessageTransport, LogMessageTransport, WebhookMessageTransport};

#[derive(Clone)]
pub struct KlaxonContext {
    pub repos: Repos,
    pub config: Config,
    pub channels: Channels,
    pub preference_locks: PreferenceLocks,
    pub sys: Arc<dyn ISys>,
}

impl KlaxonContext {
    fn create() -> Self {
        let repos = Repos::create_inmemory();
        let config = Config::new();
        let channels = Channels::new(
            repos.inbox.clone(),
            message_transport(&config.email_webhook_url, &config.webhook_key, "email"),
            message_transport(&config.sms_webhook_url, &config.webhook_key, "sms"),
        );
        Self {
            repos,
            config,
            channels,
            preference_locks: PreferenceLocks::new(),
            sys: Arc::new(RealSys {}),
        }
    }
}

fn message_transport(
    url: &Option<String>,
    key: &Option<String>,
    channel: &'static str,
) -> Arc<dyn IMessageTransport> {
    match url {
        Some(url) => Arc::new(WebhookMessageTransport::new(url.clone(), key.clone())),
        None => Arc::new(LogMessageTransport::new(channel)),
    }
}

/// Will setup the infrastructure context given the environment.
///
/// Alert, preference and delivery state live behind the repo traits; this
/// deployment keeps them in process memory, with durable stores owned by
/// external collaborators implementing the same traits.
pub async fn setup_context() -> KlaxonContext {
    KlaxonContext::create()
}
