//! aiwrap - a thin single-call client for a hosted language-model completion API.
//!
//! The [`llm::Client`] owns a [`credential::Credential`], sends one prompt as a
//! single user turn, and returns the text of the first content block of the
//! reply. Failures are logged and handed back unchanged.

pub mod config;
pub mod credential;
pub mod llm;
