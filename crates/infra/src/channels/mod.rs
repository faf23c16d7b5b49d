use crate::repos::IInboxRepo;
use crate::transports::IMessageTransport;
use klaxon_domain::{Alert, ChannelKind, DeliveryOutcome, InboxNotification, User};
use std::sync::Arc;

/// Dispatches one reminder over one channel.
///
/// Channels never return errors: every failure, transport or otherwise,
/// folds into `DeliveryOutcome::Failed` with the reason preserved for the
/// delivery log. The match on `ChannelKind` is exhaustive, so a new
/// channel variant will not compile until it is handled here.
#[derive(Clone)]
pub struct Channels {
    inbox: Arc<dyn IInboxRepo>,
    email: Arc<dyn IMessageTransport>,
    sms: Arc<dyn IMessageTransport>,
}

impl Channels {
    pub fn new(
        inbox: Arc<dyn IInboxRepo>,
        email: Arc<dyn IMessageTransport>,
        sms: Arc<dyn IMessageTransport>,
    ) -> Self {
        Self { inbox, email, sms }
    }

    pub async fn deliver(
        &self,
        channel: ChannelKind,
        user: &User,
        alert: &Alert,
        sequence: i64,
        now: i64,
    ) -> DeliveryOutcome {
        let message = alert.render_message(sequence);

        let res = match channel {
            ChannelKind::InApp => {
                let notification = InboxNotification {
                    id: Default::default(),
                    user_id: user.id.clone(),
                    alert_id: alert.id.clone(),
                    severity: alert.severity,
                    subject: message.subject.clone(),
                    body: message.body.clone(),
                    sequence,
                    delivered_at: now,
                };
                self.inbox.insert(&notification).await
            }
            ChannelKind::Email => self.email.send(&user.email, &message).await,
            ChannelKind::Sms => match &user.phone {
                Some(phone) => self.sms.send(phone, &message).await,
                None => return DeliveryOutcome::Failed("user has no phone number".into()),
            },
        };

        match res {
            Ok(()) => DeliveryOutcome::Delivered,
            Err(e) => DeliveryOutcome::Failed(e.to_string()),
        }
    }
}
