//! Medfin Wizard Engine
//!
//! The document-upload-and-preview wizard: one parameterized implementation
//! driven by a per-scheme document checklist instead of duplicated
//! per-scheme variants.
//!
//! Control flow is a linear pipeline with a human in the loop at each
//! stage: registry → validator → orchestrator → extraction store → preview
//! composer → remote submission.

pub mod api;
pub mod composer;
pub mod extraction;
pub mod instructions;
pub mod orchestrator;
pub mod progress;
pub mod registry;
pub mod validator;

// Re-export commonly used types
pub use composer::{PreviewComposer, SubmissionRequest};
pub use extraction::ExtractionStore;
pub use instructions::{GateError, InstructionSheet, InstructionsGate};
pub use orchestrator::{DocumentApi, ExtractionApi, NoopDocumentApi, SubmissionApi, UploadOrchestrator};
pub use progress::ProgressTicker;
pub use registry::{DocumentRegistry, SizeLimits};
pub use validator::{validate_document, ValidationError, ValidationOutcome};
