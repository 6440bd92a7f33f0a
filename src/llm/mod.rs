//! Language-model completion clients.

mod gemini;

pub use gemini::GeminiClient;

use crate::error::Result;

/// Text returned by a completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Generated text, as returned by the model
    pub text: String,
}

/// A synchronous text-completion backend.
///
/// Failures are surfaced to the caller; implementations do not retry.
pub trait LanguageModel {
    /// Generate a completion for `prompt` with the named model.
    fn generate(&self, model: &str, prompt: &str) -> Result<Completion>;
}

impl<T: LanguageModel + ?Sized> LanguageModel for &T {
    fn generate(&self, model: &str, prompt: &str) -> Result<Completion> {
        (**self).generate(model, prompt)
    }
}

impl<T: LanguageModel + ?Sized> LanguageModel for Box<T> {
    fn generate(&self, model: &str, prompt: &str) -> Result<Completion> {
        (**self).generate(model, prompt)
    }
}
