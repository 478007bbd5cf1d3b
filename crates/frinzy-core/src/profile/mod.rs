//! Profile domain module.
//!
//! # Module Structure
//!
//! - `model`: Finalized profile and its value types (`Profile`, `Hobby`, `HobbySet`, ...)
//! - `draft`: Onboarding draft accumulation (`ProfileDraft`, `DraftPatch`, `OnboardingStep`)
//! - `catalog`: Canonical hobbies, binary choices, vibe stickers, fun-line prompts
//! - `quiz`: Optional personality quiz
//! - `repository`: Profile persistence trait
//!
//! # Usage
//!
//! ```ignore
//! use frinzy_core::profile::{Profile, ProfileDraft, DraftPatch, ProfileRepository};
//! ```

pub mod catalog;
mod draft;
mod model;
mod quiz;
mod repository;

// Re-export public API
pub use draft::{
    Credentials, DraftPatch, FinalizeInputs, OnboardingStep, ProfileDraft, progress_percent,
};
pub use model::{
    CUSTOM_HOBBY_PREFIX, City, Gender, Hobby, HobbySet, NEWCOMER_LABEL, Profile, ProfileEdit,
    TraitHints,
};
pub use quiz::{PERSONALITY_QUESTIONS, PersonalityQuiz, PersonalityType, QuizQuestion, determine_personality};
pub use repository::ProfileRepository;
