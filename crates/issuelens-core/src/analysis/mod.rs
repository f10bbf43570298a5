// SPDX-License-Identifier: Apache-2.0

//! Analysis post-processing.
//!
//! Validates model output, classifies issues heuristically when the model is
//! unusable, and combines the two into a normalizer that always yields a
//! valid [`IssueAnalysis`](crate::IssueAnalysis).

pub mod fallback;
pub mod normalize;
pub mod validator;

pub use fallback::{classify, infer_type};
pub use normalize::{NormalizeOutcome, extract_json_object, normalize, normalize_outcome};
pub use validator::validate;
