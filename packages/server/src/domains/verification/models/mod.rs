pub mod adjudication;
pub mod claim;
pub mod evidence;
pub mod extraction;
pub mod progress;
pub mod trusted_domains;
pub mod verification_event;

pub use adjudication::{AdjudicationResult, Verdict, ADJUDICATION_FAILED_MESSAGE};
pub use claim::Claim;
pub use evidence::{EvidenceItem, EvidenceSource, FactCheckDetails, FAILED_SNIPPET};
pub use extraction::{ExtractedEvent, Extraction};
pub use progress::{PipelineStage, ProgressEvent};
pub use trusted_domains::TrustedDomainSet;
pub use verification_event::{NewVerificationEvent, VerificationEvent};
