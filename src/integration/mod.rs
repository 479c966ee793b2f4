// src/integration/mod.rs - Boundary between the engine and the content-submission path

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::engine::AutoModerator;
use crate::types::{Category, Decision, ModerationAction};

/// What kind of entity the moderated text belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Review,
    Comment,
}

/// The slice of a Decision the caller persists into the entity's `Flags`
/// field. Written at creation and rewritten (recomputed, never diffed) on
/// every text edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagRecord {
    pub content_id: String,
    pub kind: ContentKind,
    /// The decision's total score, stored as the entity's flag value.
    pub flags: u32,
    pub action: ModerationAction,
    pub decided_at: DateTime<Utc>,
}

/// Filed for moderator visibility whenever content is flagged or rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationReport {
    pub content_id: String,
    pub kind: ContentKind,
    pub reason: String,
    pub total_score: u32,
    pub categories: Vec<Category>,
    pub created_at: DateTime<Utc>,
}

/// External collaborator seam: the persistence layer the submission path
/// already owns. The gateway stores nothing itself.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Write the flag value into the entity. The surrounding transaction is
    /// the caller's responsibility.
    async fn persist_flags(&self, record: &FlagRecord) -> anyhow::Result<()>;

    /// Queue a report for moderator review.
    async fn file_report(&self, report: &ModerationReport) -> anyhow::Result<()>;
}

#[derive(Debug, Error)]
pub enum GatewayError {
    /// The content must not be persisted; surface this to the submitter.
    #[error("content {content_id} was rejected by the auto-moderator")]
    Rejected {
        content_id: String,
        decision: Decision,
    },
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Invoked by the content-creation/update path before a review or comment is
/// persisted. Screens the text, writes the flag value through the injected
/// repository, and raises a report when moderators need to see the content.
pub struct ModerationGateway {
    engine: Arc<AutoModerator>,
    repository: Arc<dyn ContentRepository>,
}

impl ModerationGateway {
    pub fn new(engine: Arc<AutoModerator>, repository: Arc<dyn ContentRepository>) -> Self {
        Self { engine, repository }
    }

    /// Screen new content before its first persist.
    pub async fn screen(
        &self,
        content_id: &str,
        kind: ContentKind,
        text: Option<&str>,
    ) -> Result<Decision, GatewayError> {
        let decision = self.engine.review(text);

        match decision.action {
            ModerationAction::Reject => {
                warn!(
                    "rejecting {:?} {} with score {}",
                    kind, content_id, decision.total_score
                );
                self.repository
                    .file_report(&self.report_for(content_id, kind, &decision))
                    .await?;
                Err(GatewayError::Rejected {
                    content_id: content_id.to_string(),
                    decision,
                })
            }
            ModerationAction::Flag => {
                info!(
                    "flagging {:?} {} for review (score {})",
                    kind, content_id, decision.total_score
                );
                self.repository
                    .persist_flags(&self.record_for(content_id, kind, &decision))
                    .await?;
                self.repository
                    .file_report(&self.report_for(content_id, kind, &decision))
                    .await?;
                Ok(decision)
            }
            ModerationAction::Publish => {
                self.repository
                    .persist_flags(&self.record_for(content_id, kind, &decision))
                    .await?;
                Ok(decision)
            }
        }
    }

    /// Re-screen after a text edit. Same path as [`screen`](Self::screen):
    /// the score is recomputed from scratch, never diffed.
    pub async fn rescreen(
        &self,
        content_id: &str,
        kind: ContentKind,
        text: Option<&str>,
    ) -> Result<Decision, GatewayError> {
        self.screen(content_id, kind, text).await
    }

    fn record_for(&self, content_id: &str, kind: ContentKind, decision: &Decision) -> FlagRecord {
        FlagRecord {
            content_id: content_id.to_string(),
            kind,
            flags: decision.total_score,
            action: decision.action,
            decided_at: Utc::now(),
        }
    }

    fn report_for(
        &self,
        content_id: &str,
        kind: ContentKind,
        decision: &Decision,
    ) -> ModerationReport {
        let categories = decision.breakdown.fired_categories();
        let named: Vec<&str> = categories.iter().map(Category::as_str).collect();
        ModerationReport {
            content_id: content_id.to_string(),
            kind,
            reason: format!(
                "auto-moderator scored {} ({})",
                decision.total_score,
                named.join(", ")
            ),
            total_score: decision.total_score,
            categories,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::Mutex;

    /// Records every call so tests can assert on the persistence traffic.
    #[derive(Default)]
    struct RecordingRepository {
        flags: Mutex<Vec<FlagRecord>>,
        reports: Mutex<Vec<ModerationReport>>,
    }

    #[async_trait]
    impl ContentRepository for RecordingRepository {
        async fn persist_flags(&self, record: &FlagRecord) -> anyhow::Result<()> {
            self.flags.lock().await.push(record.clone());
            Ok(())
        }

        async fn file_report(&self, report: &ModerationReport) -> anyhow::Result<()> {
            self.reports.lock().await.push(report.clone());
            Ok(())
        }
    }

    fn gateway() -> (ModerationGateway, Arc<RecordingRepository>) {
        let repository = Arc::new(RecordingRepository::default());
        let gateway = ModerationGateway::new(
            Arc::new(AutoModerator::default()),
            repository.clone() as Arc<dyn ContentRepository>,
        );
        (gateway, repository)
    }

    #[tokio::test]
    async fn publish_persists_flags_without_a_report() {
        let (gateway, repository) = gateway();
        let decision = gateway
            .screen(
                "review-1",
                ContentKind::Review,
                Some("a thoughtful appraisal of the picture and its pacing"),
            )
            .await
            .unwrap();

        assert_eq!(decision.action, ModerationAction::Publish);
        let flags = repository.flags.lock().await;
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].content_id, "review-1");
        assert_eq!(flags[0].flags, decision.total_score);
        assert!(repository.reports.lock().await.is_empty());
    }

    #[tokio::test]
    async fn flag_persists_and_files_a_report() {
        let (gateway, repository) = gateway();
        let decision = gateway
            .screen(
                "comment-7",
                ContentKind::Comment,
                Some("find me on instagram if you want to talk about this more"),
            )
            .await
            .unwrap();

        assert_eq!(decision.action, ModerationAction::Flag);
        assert_eq!(repository.flags.lock().await.len(), 1);
        let reports = repository.reports.lock().await;
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].kind, ContentKind::Comment);
        assert!(reports[0].categories.contains(&Category::Solicitation));
    }

    #[tokio::test]
    async fn reject_files_a_report_and_never_persists() {
        let (gateway, repository) = gateway();
        let result = gateway
            .screen("review-9", ContentKind::Review, Some("holy shit"))
            .await;

        match result {
            Err(GatewayError::Rejected {
                content_id,
                decision,
            }) => {
                assert_eq!(content_id, "review-9");
                assert_eq!(decision.action, ModerationAction::Reject);
            }
            other => panic!("expected rejection, got {:?}", other.map(|d| d.action)),
        }
        assert!(repository.flags.lock().await.is_empty());
        assert_eq!(repository.reports.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn rescreen_recomputes_after_an_edit() {
        let (gateway, repository) = gateway();
        gateway
            .screen(
                "review-3",
                ContentKind::Review,
                Some("find me on instagram if you want to talk about this more"),
            )
            .await
            .unwrap();
        let edited = gateway
            .rescreen(
                "review-3",
                ContentKind::Review,
                Some("a calmer second draft without any contact details in it"),
            )
            .await
            .unwrap();

        assert_eq!(edited.action, ModerationAction::Publish);
        let flags = repository.flags.lock().await;
        assert_eq!(flags.len(), 2);
        assert_eq!(flags[1].flags, edited.total_score);
    }
}
