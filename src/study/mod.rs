//! Presentation-side study helpers
//!
//! None of this affects scheduling; a front end uses it to decide how the
//! current item is shown and to check typed or chosen answers.

pub mod choices;
pub mod modes;

pub use choices::{answer_matches, choice_options, DISTRACTOR_COUNT};
pub use modes::{choose_mode, typed_prompt, StudyDirection, StudyMode, TypedPrompt};
