use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::{AdjudicationResult, EvidenceItem, ExtractedEvent};

/// A completed verification, as stored and as returned by the logs endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationEvent {
    pub id: Uuid,
    pub claim: String,
    pub extraction: ExtractedEvent,
    pub evidence: Vec<EvidenceItem>,
    pub verification: AdjudicationResult,
    pub user_email: String,
    pub created_at: DateTime<Utc>,
}

/// Fields needed to persist a run. The email is normalized on construction.
#[derive(Debug, Clone)]
pub struct NewVerificationEvent {
    pub claim: String,
    pub extraction: ExtractedEvent,
    pub evidence: Vec<EvidenceItem>,
    pub verification: AdjudicationResult,
    pub user_email: String,
}

impl NewVerificationEvent {
    pub fn new(
        claim: impl Into<String>,
        extraction: ExtractedEvent,
        evidence: Vec<EvidenceItem>,
        verification: AdjudicationResult,
        user_email: &str,
    ) -> Self {
        Self {
            claim: claim.into(),
            extraction,
            evidence,
            verification,
            user_email: normalize_email(user_email),
        }
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[derive(sqlx::FromRow)]
struct VerificationEventRow {
    id: Uuid,
    claim: String,
    extraction: Json<ExtractedEvent>,
    evidence: Json<Vec<EvidenceItem>>,
    verification: Json<AdjudicationResult>,
    user_email: String,
    created_at: DateTime<Utc>,
}

impl From<VerificationEventRow> for VerificationEvent {
    fn from(row: VerificationEventRow) -> Self {
        Self {
            id: row.id,
            claim: row.claim,
            extraction: row.extraction.0,
            evidence: row.evidence.0,
            verification: row.verification.0,
            user_email: row.user_email,
            created_at: row.created_at,
        }
    }
}

// =============================================================================
// Queries
// =============================================================================

impl VerificationEvent {
    pub async fn create(new: &NewVerificationEvent, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, VerificationEventRow>(
            r#"
            INSERT INTO verification_events (id, claim, extraction, evidence, verification, user_email)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(&new.claim)
        .bind(Json(&new.extraction))
        .bind(Json(&new.evidence))
        .bind(Json(&new.verification))
        .bind(&new.user_email)
        .fetch_one(pool)
        .await
        .map(Self::from)
        .map_err(Into::into)
    }

    /// All events owned by `email`, newest first.
    pub async fn find_by_user_email(email: &str, pool: &PgPool) -> Result<Vec<Self>> {
        let rows = sqlx::query_as::<_, VerificationEventRow>(
            "SELECT * FROM verification_events WHERE user_email = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(normalize_email(email))
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::verification::Verdict;

    #[test]
    fn test_new_event_normalizes_email() {
        let event = NewVerificationEvent::new(
            "claim",
            ExtractedEvent::default(),
            vec![],
            AdjudicationResult::new(Verdict::Unverified, ""),
            "  Reporter@Example.COM ",
        );
        assert_eq!(event.user_email, "reporter@example.com");
    }

    #[test]
    fn test_serializes_camel_case() {
        let event = VerificationEvent {
            id: Uuid::new_v4(),
            claim: "claim".into(),
            extraction: ExtractedEvent::new("Flood", "Assam", "June 2024"),
            evidence: vec![EvidenceItem::web("https://bbc.com/x", "Flooding in Assam")],
            verification: AdjudicationResult::new(Verdict::Occurred, "Widely reported"),
            user_email: "a@b.com".into(),
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["userEmail"], "a@b.com");
        assert!(value["createdAt"].is_string());
        assert_eq!(value["extraction"]["location"], "Assam");
        assert_eq!(value["verification"]["result"], "Occurred");
    }
}
