//! Progress events broadcast while a verification run executes.
//!
//! Every event carries the `runId` so observers can tell concurrent runs
//! apart. Progress values are fixed per stage and never decrease within a run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pipeline stages in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Started,
    Extracting,
    QueryBuilding,
    Fetching,
    Adjudicating,
    Persisting,
    Completed,
}

impl PipelineStage {
    pub fn progress(self) -> u8 {
        match self {
            PipelineStage::Started => 0,
            PipelineStage::Extracting => 20,
            PipelineStage::QueryBuilding => 40,
            PipelineStage::Fetching => 60,
            PipelineStage::Adjudicating => 80,
            PipelineStage::Persisting => 90,
            PipelineStage::Completed => 100,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PipelineStage::Started => "Starting verification process...",
            PipelineStage::Extracting => "Extracting event information...",
            PipelineStage::QueryBuilding => "Building search query...",
            PipelineStage::Fetching => "Searching for fact-checking sources...",
            PipelineStage::Adjudicating => "Analyzing evidence with AI...",
            PipelineStage::Persisting => "Saving results...",
            PipelineStage::Completed => "Verification complete!",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEvent {
    #[serde(rename_all = "camelCase")]
    VerificationStarted {
        run_id: Uuid,
        message: String,
        claim: String,
        progress: u8,
        timestamp: DateTime<Utc>,
    },

    #[serde(rename_all = "camelCase")]
    StatusUpdate {
        run_id: Uuid,
        stage: PipelineStage,
        message: String,
        progress: u8,
        timestamp: DateTime<Utc>,
    },

    #[serde(rename_all = "camelCase")]
    VerificationComplete {
        run_id: Uuid,
        id: Uuid,
        message: String,
        progress: u8,
        timestamp: DateTime<Utc>,
    },

    #[serde(rename_all = "camelCase")]
    Error {
        run_id: Uuid,
        message: String,
        timestamp: DateTime<Utc>,
    },
}

impl ProgressEvent {
    pub fn started(run_id: Uuid, claim: &str) -> Self {
        ProgressEvent::VerificationStarted {
            run_id,
            message: PipelineStage::Started.message().to_string(),
            claim: claim.to_string(),
            progress: PipelineStage::Started.progress(),
            timestamp: Utc::now(),
        }
    }

    pub fn stage(run_id: Uuid, stage: PipelineStage) -> Self {
        ProgressEvent::StatusUpdate {
            run_id,
            stage,
            message: stage.message().to_string(),
            progress: stage.progress(),
            timestamp: Utc::now(),
        }
    }

    pub fn completed(run_id: Uuid, id: Uuid) -> Self {
        ProgressEvent::VerificationComplete {
            run_id,
            id,
            message: PipelineStage::Completed.message().to_string(),
            progress: PipelineStage::Completed.progress(),
            timestamp: Utc::now(),
        }
    }

    pub fn failed(run_id: Uuid, reason: &str) -> Self {
        ProgressEvent::Error {
            run_id,
            message: format!("Verification failed: {}", reason),
            timestamp: Utc::now(),
        }
    }

    pub fn run_id(&self) -> Uuid {
        match self {
            ProgressEvent::VerificationStarted { run_id, .. }
            | ProgressEvent::StatusUpdate { run_id, .. }
            | ProgressEvent::VerificationComplete { run_id, .. }
            | ProgressEvent::Error { run_id, .. } => *run_id,
        }
    }

    /// Progress percentage, `None` for error events.
    pub fn progress(&self) -> Option<u8> {
        match self {
            ProgressEvent::VerificationStarted { progress, .. }
            | ProgressEvent::StatusUpdate { progress, .. }
            | ProgressEvent::VerificationComplete { progress, .. } => Some(*progress),
            ProgressEvent::Error { .. } => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ProgressEvent::VerificationComplete { .. } | ProgressEvent::Error { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_progress_is_monotonic() {
        let stages = [
            PipelineStage::Started,
            PipelineStage::Extracting,
            PipelineStage::QueryBuilding,
            PipelineStage::Fetching,
            PipelineStage::Adjudicating,
            PipelineStage::Persisting,
            PipelineStage::Completed,
        ];
        let values: Vec<u8> = stages.iter().map(|s| s.progress()).collect();
        assert_eq!(values, vec![0, 20, 40, 60, 80, 90, 100]);
    }

    #[test]
    fn test_status_update_wire_shape() {
        let run_id = Uuid::new_v4();
        let value = serde_json::to_value(ProgressEvent::stage(run_id, PipelineStage::Fetching)).unwrap();

        assert_eq!(value["type"], "status_update");
        assert_eq!(value["runId"], run_id.to_string());
        assert_eq!(value["stage"], "fetching");
        assert_eq!(value["message"], "Searching for fact-checking sources...");
        assert_eq!(value["progress"], 60);
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn test_complete_and_error_wire_shape() {
        let run_id = Uuid::new_v4();
        let id = Uuid::new_v4();

        let done = serde_json::to_value(ProgressEvent::completed(run_id, id)).unwrap();
        assert_eq!(done["type"], "verification_complete");
        assert_eq!(done["id"], id.to_string());
        assert_eq!(done["progress"], 100);

        let failed = ProgressEvent::failed(run_id, "Failed to extract event info");
        assert!(failed.is_terminal());
        assert_eq!(failed.progress(), None);
        let failed = serde_json::to_value(failed).unwrap();
        assert_eq!(failed["type"], "error");
        assert_eq!(failed["message"], "Verification failed: Failed to extract event info");
    }
}
