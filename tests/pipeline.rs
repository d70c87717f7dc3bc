// Pipeline scenario tests: the full check flow against in-process doubles.
//
// A scripted classifier and a recording chat port stand in for the
// Sightengine API and the platform adapter, so every routing branch can
// be exercised without network access: flagged/invalid/clean attachments,
// avatar checks, the unconfigured-destination reminder, classifier
// outages, and delivery failures.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;

use palisade::classifier::ImageClassifier;
use palisade::handlers::{commands, CheckOutcome, Moderator};
use palisade::platform::port::ChatPort;
use palisade::platform::types::{ChannelId, MemberJoinEvent, MessageEvent, UserId};
use palisade::report::{Report, ReportChannelStore, COLOR_AMBER, COLOR_RED, SETUP_REMINDER};
use palisade::verdict::Classification;

// ============================================================
// Test doubles
// ============================================================

/// Classifier scripted with a fixed response (or a fixed failure).
struct ScriptedClassifier {
    response: Result<serde_json::Value, String>,
}

impl ScriptedClassifier {
    fn responding(body: serde_json::Value) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(body),
        })
    }

    fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Err(message.to_string()),
        })
    }
}

#[async_trait]
impl ImageClassifier for ScriptedClassifier {
    async fn classify(&self, _image_url: &str) -> Result<Classification> {
        match &self.response {
            Ok(body) => Classification::from_value(body.clone()),
            Err(message) => anyhow::bail!("{message}"),
        }
    }
}

/// Chat port that records everything sent through it.
#[derive(Default)]
struct RecordingPort {
    reports: Mutex<Vec<(ChannelId, Report)>>,
    texts: Mutex<Vec<(ChannelId, String)>>,
}

impl RecordingPort {
    fn reports(&self) -> Vec<(ChannelId, Report)> {
        self.reports.lock().unwrap().clone()
    }

    fn texts(&self) -> Vec<(ChannelId, String)> {
        self.texts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatPort for RecordingPort {
    async fn send_report(&self, channel: &ChannelId, report: &Report) -> Result<()> {
        self.reports
            .lock()
            .unwrap()
            .push((channel.clone(), report.clone()));
        Ok(())
    }

    async fn send_text(&self, channel: &ChannelId, text: &str) -> Result<()> {
        self.texts
            .lock()
            .unwrap()
            .push((channel.clone(), text.to_string()));
        Ok(())
    }
}

/// Chat port whose deliveries always fail (deleted channel, missing perms).
struct BrokenPort;

#[async_trait]
impl ChatPort for BrokenPort {
    async fn send_report(&self, _channel: &ChannelId, _report: &Report) -> Result<()> {
        anyhow::bail!("Unknown Channel")
    }

    async fn send_text(&self, _channel: &ChannelId, _text: &str) -> Result<()> {
        anyhow::bail!("Unknown Channel")
    }
}

// ============================================================
// Fixtures
// ============================================================

fn flagged_body() -> serde_json::Value {
    json!({
        "status": "success",
        "request": { "id": "req_1", "timestamp": 1684231566.0, "operations": 1 },
        "nudity": { "raw": 0.91, "partial": 0.05, "safe": 0.02 },
        "weapon": 0.01,
    })
}

fn clean_body() -> serde_json::Value {
    json!({
        "status": "success",
        "request": { "id": "req_2", "timestamp": 1684231566.0, "operations": 1 },
        "nudity": { "raw": 0.01, "partial": 0.01, "safe": 0.97 },
        "weapon": 0.02,
    })
}

fn moderator(classifier: Arc<dyn ImageClassifier>, port: Arc<RecordingPort>) -> Moderator {
    Moderator::new(classifier, port, ReportChannelStore::new(), 4)
}

fn configured(moderator: &Moderator, id: &str) {
    moderator.store().set(ChannelId::new(id));
}

fn message(urls: &[&str]) -> MessageEvent {
    MessageEvent {
        author: UserId::new("111"),
        channel: ChannelId::new("222"),
        attachment_urls: urls.iter().map(|u| u.to_string()).collect(),
    }
}

// ============================================================
// Setup command
// ============================================================

#[tokio::test]
async fn setup_command_configures_the_store_and_names_the_channel() {
    let store = ReportChannelStore::new();

    let reply = commands::dispatch("setup", || async {
        Ok(commands::setup(&store, ChannelId::new("900"), "mod-logs"))
    })
    .await;

    assert_eq!(store.get(), Some(ChannelId::new("900")));
    assert_eq!(
        reply,
        "The channel that will be used for logging will be: mod-logs."
    );
}

// ============================================================
// Attachment scenarios
// ============================================================

#[tokio::test]
async fn flagged_attachment_produces_a_red_report_with_audit_trail() {
    let port = Arc::new(RecordingPort::default());
    let moderator = moderator(ScriptedClassifier::responding(flagged_body()), port.clone());
    configured(&moderator, "900");

    let outcomes = moderator
        .handle_message(&message(&["https://cdn.example/a.png"]))
        .await;

    assert_eq!(outcomes, vec![CheckOutcome::Flagged]);
    let reports = port.reports();
    assert_eq!(reports.len(), 1);

    let (destination, report) = &reports[0];
    assert_eq!(destination, &ChannelId::new("900"));
    assert_eq!(report.color, COLOR_RED);
    assert!(report.description.contains("<@111>"));
    assert!(report.description.contains("<#222>"));
    // The raw API response rides along for audit
    assert!(report.description.contains("\"raw\": 0.91"));
    assert!(port.texts().is_empty());
}

#[tokio::test]
async fn invalid_attachment_produces_an_amber_report() {
    let port = Arc::new(RecordingPort::default());
    let moderator = moderator(ScriptedClassifier::responding(clean_body()), port.clone());
    configured(&moderator, "900");

    let outcomes = moderator
        .handle_message(&message(&["https://cdn.example/clip.mp4"]))
        .await;

    assert_eq!(outcomes, vec![CheckOutcome::Invalid]);
    let reports = port.reports();
    assert_eq!(reports.len(), 1);

    let (_, report) = &reports[0];
    assert_eq!(report.color, COLOR_AMBER);
    assert!(report.description.contains("<@111>"));
    assert!(report.description.contains("<#222>"));
}

#[tokio::test]
async fn clean_attachment_sends_nothing() {
    let port = Arc::new(RecordingPort::default());
    let moderator = moderator(ScriptedClassifier::responding(clean_body()), port.clone());
    configured(&moderator, "900");

    let outcomes = moderator
        .handle_message(&message(&["https://cdn.example/a.png"]))
        .await;

    assert_eq!(outcomes, vec![CheckOutcome::Clean]);
    assert!(port.reports().is_empty());
    assert!(port.texts().is_empty());
}

#[tokio::test]
async fn classifier_outage_is_contained_and_sends_nothing() {
    let port = Arc::new(RecordingPort::default());
    let moderator = moderator(
        ScriptedClassifier::failing("connection refused"),
        port.clone(),
    );
    configured(&moderator, "900");

    let outcomes = moderator
        .handle_message(&message(&["https://cdn.example/a.png"]))
        .await;

    // Indeterminate: no report either way, and the handler still succeeds.
    assert_eq!(outcomes, vec![CheckOutcome::Unavailable]);
    assert!(port.reports().is_empty());
    assert!(port.texts().is_empty());
}

#[tokio::test]
async fn unconfigured_destination_degrades_to_a_reminder_in_the_origin_channel() {
    let port = Arc::new(RecordingPort::default());
    let moderator = moderator(ScriptedClassifier::responding(flagged_body()), port.clone());
    // No destination configured.

    let outcomes = moderator
        .handle_message(&message(&["https://cdn.example/a.png"]))
        .await;

    assert_eq!(outcomes, vec![CheckOutcome::Flagged]);
    assert!(port.reports().is_empty());

    let texts = port.texts();
    assert_eq!(texts.len(), 1);
    assert_eq!(texts[0].0, ChannelId::new("222"));
    assert_eq!(texts[0].1, SETUP_REMINDER);
}

#[tokio::test]
async fn mixed_attachments_fan_out_independently() {
    let port = Arc::new(RecordingPort::default());
    let moderator = moderator(ScriptedClassifier::responding(flagged_body()), port.clone());
    configured(&moderator, "900");

    let outcomes = moderator
        .handle_message(&message(&[
            "https://cdn.example/a.png",
            "https://cdn.example/clip.mp4",
            "https://cdn.example/b.GIF",
        ]))
        .await;

    assert_eq!(outcomes.len(), 3);
    let flagged = outcomes
        .iter()
        .filter(|o| **o == CheckOutcome::Flagged)
        .count();
    let invalid = outcomes
        .iter()
        .filter(|o| **o == CheckOutcome::Invalid)
        .count();
    assert_eq!(flagged, 2);
    assert_eq!(invalid, 1);
    // Two red reports and one amber, in whatever order the tasks finished.
    assert_eq!(port.reports().len(), 3);
}

#[tokio::test]
async fn message_without_attachments_is_a_no_op() {
    let port = Arc::new(RecordingPort::default());
    let moderator = moderator(ScriptedClassifier::responding(flagged_body()), port.clone());
    configured(&moderator, "900");

    let outcomes = moderator.handle_message(&message(&[])).await;

    assert!(outcomes.is_empty());
    assert!(port.reports().is_empty());
}

// ============================================================
// Avatar scenarios
// ============================================================

#[tokio::test]
async fn flagged_avatar_produces_a_red_report_without_a_channel_mention() {
    let port = Arc::new(RecordingPort::default());
    let moderator = moderator(ScriptedClassifier::responding(flagged_body()), port.clone());
    configured(&moderator, "900");

    let outcome = moderator
        .handle_member_join(&MemberJoinEvent {
            user: UserId::new("333"),
            avatar_url: "https://cdn.example/avatars/333.webp".to_string(),
        })
        .await;

    assert_eq!(outcome, CheckOutcome::Flagged);
    let reports = port.reports();
    assert_eq!(reports.len(), 1);

    let (_, report) = &reports[0];
    assert_eq!(report.color, COLOR_RED);
    assert!(report.title.to_lowercase().contains("avatar"));
    assert!(report.description.contains("<@333>"));
    assert!(!report.description.contains("<#"));
}

#[tokio::test]
async fn flagged_avatar_without_destination_is_only_logged() {
    let port = Arc::new(RecordingPort::default());
    let moderator = moderator(ScriptedClassifier::responding(flagged_body()), port.clone());
    // No destination, and no origin channel to remind.

    let outcome = moderator
        .handle_member_join(&MemberJoinEvent {
            user: UserId::new("333"),
            avatar_url: "https://cdn.example/avatars/333.webp".to_string(),
        })
        .await;

    assert_eq!(outcome, CheckOutcome::Flagged);
    assert!(port.reports().is_empty());
    assert!(port.texts().is_empty());
}

#[tokio::test]
async fn clean_avatar_sends_nothing() {
    let port = Arc::new(RecordingPort::default());
    let moderator = moderator(ScriptedClassifier::responding(clean_body()), port.clone());
    configured(&moderator, "900");

    let outcome = moderator
        .handle_member_join(&MemberJoinEvent {
            user: UserId::new("333"),
            avatar_url: "https://cdn.example/avatars/333.png".to_string(),
        })
        .await;

    assert_eq!(outcome, CheckOutcome::Clean);
    assert!(port.reports().is_empty());
}

// ============================================================
// Delivery failure containment
// ============================================================

#[tokio::test]
async fn failed_delivery_does_not_fail_the_check() {
    let moderator = Moderator::new(
        ScriptedClassifier::responding(flagged_body()),
        Arc::new(BrokenPort),
        ReportChannelStore::new(),
        4,
    );
    moderator.store().set(ChannelId::new("deleted-channel"));

    // The port rejects the send; the handler logs it and moves on.
    let outcomes = moderator
        .handle_message(&message(&["https://cdn.example/a.png"]))
        .await;

    assert_eq!(outcomes, vec![CheckOutcome::Flagged]);
}
