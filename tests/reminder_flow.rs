mod helpers;

use helpers::setup::spawn_app;
use helpers::utils::{hours, monday_morning};
use klaxon_domain::{ChannelKind, DeliveryOutcome, Severity, VisibilityRule};
use klaxon_engine::alert::archive_alert::ArchiveAlertUseCase;
use klaxon_engine::alert::create_alert::CreateAlertUseCase;
use klaxon_engine::execute;
use klaxon_engine::preference::mark_read::MarkAlertReadUseCase;
use klaxon_engine::preference::snooze_alert::SnoozeAlertUseCase;
use klaxon_engine::reminders::process_reminders::ProcessRemindersUseCase;

#[tokio::test]
async fn team_alert_reminder_lifecycle() {
    let app = spawn_app(monday_morning()).await;
    let admin = app.add_admin("admin").await;
    let team = app.add_team("Engineering").await;
    let ola = app.add_member("ola", Some(team.id.clone())).await;
    let kari = app.add_member("kari", Some(team.id.clone())).await;
    let outsider = app.add_member("outsider", None).await;

    // Publishing delivers the first pass to the whole team right away
    let alert = execute(
        CreateAlertUseCase {
            title: "Rotate your API tokens".into(),
            message: "The old signing key is revoked on friday".into(),
            severity: Severity::Critical,
            visibility: VisibilityRule::Team(team.id.clone()),
            channels: None,
            start_at: None,
            expires_at: None,
            reminder_interval: None,
            reminders_enabled: None,
            created_by: admin.id.clone(),
        },
        &app.ctx,
    )
    .await
    .expect("To create alert");

    for user in [&ola, &kari] {
        let preference = app
            .ctx
            .repos
            .preferences
            .find(&user.id, &alert.id)
            .await
            .expect("Preference to exist after the first pass");
        assert_eq!(preference.reminder_sequence, 1);

        let inbox = app.ctx.repos.inbox.find_by_user(&user.id).await;
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].subject, "[CRITICAL] Rotate your API tokens");
    }

    // Kari reads the alert, Ola keeps ignoring it
    execute(
        MarkAlertReadUseCase {
            user_id: kari.id.clone(),
            alert_id: alert.id.clone(),
        },
        &app.ctx,
    )
    .await
    .expect("To mark alert read");

    // Two hours later, the default interval, only Ola is re-notified
    app.sys.advance(hours(2));
    let summary = execute(ProcessRemindersUseCase, &app.ctx)
        .await
        .expect("To run the reminder tick");
    assert_eq!(summary.users_reminded, 1);
    assert_eq!(summary.users_skipped, 1);

    let ola_inbox = app.ctx.repos.inbox.find_by_user(&ola.id).await;
    assert_eq!(ola_inbox.len(), 2);
    // Newest first, and later passes are labelled
    assert!(ola_inbox[0].body.contains("(reminder #2)"));
    assert_eq!(app.ctx.repos.inbox.find_by_user(&kari.id).await.len(), 1);

    // Ola snoozes for the rest of the day
    execute(
        SnoozeAlertUseCase {
            user_id: ola.id.clone(),
            alert_id: alert.id.clone(),
        },
        &app.ctx,
    )
    .await
    .expect("To snooze alert");

    app.sys.advance(hours(2));
    let summary = execute(ProcessRemindersUseCase, &app.ctx)
        .await
        .expect("To run the reminder tick");
    assert_eq!(summary.users_reminded, 0);
    assert_eq!(summary.users_skipped, 2);

    // Next morning the snooze has lapsed and Ola alone is re-notified
    app.sys.set(monday_morning() + hours(25));
    let summary = execute(ProcessRemindersUseCase, &app.ctx)
        .await
        .expect("To run the reminder tick");
    assert_eq!(summary.users_reminded, 1);

    let ola_preference = app
        .ctx
        .repos
        .preferences
        .find(&ola.id, &alert.id)
        .await
        .unwrap();
    assert_eq!(ola_preference.reminder_sequence, 3);
    let kari_preference = app
        .ctx
        .repos
        .preferences
        .find(&kari.id, &alert.id)
        .await
        .unwrap();
    assert_eq!(kari_preference.reminder_sequence, 1);

    // Every delivered pass left exactly one log record for the pair
    let ola_history = app
        .ctx
        .repos
        .deliveries
        .find_by_user_and_alert(&ola.id, &alert.id)
        .await;
    assert_eq!(ola_history.len(), 3);
    assert!(ola_history
        .iter()
        .all(|r| r.outcome == DeliveryOutcome::Delivered));
    assert_eq!(
        ola_history.iter().map(|r| r.sequence).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );

    // Archiving silences the alert for good
    execute(
        ArchiveAlertUseCase {
            alert_id: alert.id.clone(),
        },
        &app.ctx,
    )
    .await
    .expect("To archive alert");

    app.sys.advance(hours(3));
    let summary = execute(ProcessRemindersUseCase, &app.ctx)
        .await
        .expect("To run the reminder tick");
    assert_eq!(summary.alerts_considered, 0);
    assert_eq!(app.ctx.repos.inbox.find_by_user(&ola.id).await.len(), 3);

    // The outsider was never part of the audience
    assert!(app
        .ctx
        .repos
        .deliveries
        .find_by_user(&outsider.id)
        .await
        .is_empty());
}

#[tokio::test]
async fn organization_alert_over_mixed_channels() {
    let app = spawn_app(monday_morning()).await;
    let admin = app.add_admin("admin").await;
    let mut ola = app.add_member("ola", None).await;
    ola.phone = Some("+4740000000".into());
    app.ctx.repos.users.save(&ola).await.unwrap();
    let kari = app.add_member("kari", None).await;

    let alert = execute(
        CreateAlertUseCase {
            title: "Office closed tomorrow".into(),
            message: "Water damage on the third floor".into(),
            severity: Severity::Warning,
            visibility: VisibilityRule::Organization,
            channels: Some(vec![
                ChannelKind::InApp,
                ChannelKind::Email,
                ChannelKind::Sms,
            ]),
            start_at: None,
            expires_at: None,
            reminder_interval: Some(hours(1)),
            reminders_enabled: None,
            created_by: admin.id.clone(),
        },
        &app.ctx,
    )
    .await
    .expect("To create alert");

    // Ola has a phone number, every channel went through
    let ola_history = app
        .ctx
        .repos
        .deliveries
        .find_by_user_and_alert(&ola.id, &alert.id)
        .await;
    assert_eq!(ola_history.len(), 3);
    assert!(ola_history
        .iter()
        .all(|r| r.outcome == DeliveryOutcome::Delivered));

    // Kari has none, the SMS attempt is logged as failed but the pass
    // still counts because the other channels got through
    let kari_history = app
        .ctx
        .repos
        .deliveries
        .find_by_user_and_alert(&kari.id, &alert.id)
        .await;
    assert_eq!(kari_history.len(), 3);
    let sms = kari_history
        .iter()
        .find(|r| r.channel == ChannelKind::Sms)
        .unwrap();
    assert_eq!(
        sms.outcome,
        DeliveryOutcome::Failed("user has no phone number".into())
    );
    let kari_preference = app
        .ctx
        .repos
        .preferences
        .find(&kari.id, &alert.id)
        .await
        .unwrap();
    assert_eq!(kari_preference.reminder_sequence, 1);

    // The next pass attempts all three channels again
    app.sys.advance(hours(1));
    execute(ProcessRemindersUseCase, &app.ctx)
        .await
        .expect("To run the reminder tick");
    let kari_history = app
        .ctx
        .repos
        .deliveries
        .find_by_user_and_alert(&kari.id, &alert.id)
        .await;
    assert_eq!(kari_history.len(), 6);
    assert_eq!(kari_history.iter().filter(|r| r.sequence == 2).count(), 3);
}
