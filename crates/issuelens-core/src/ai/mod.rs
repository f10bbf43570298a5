// SPDX-License-Identifier: Apache-2.0

//! AI integration module.
//!
//! Provides the text-generation provider abstraction, the Gemini client, and
//! the analysis prompt.

pub mod gemini;
pub mod prompt;
pub mod provider;
pub mod types;

pub use gemini::GeminiClient;
pub use prompt::build_prompt;
pub use provider::AiProvider;
