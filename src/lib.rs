//! Cihui: a spaced-repetition vocabulary trainer
//!
//! The heart of the crate is [`session::SessionScheduler`], which works a
//! bounded batch of words drawn from a [`vocabulary::VocabularyStore`] and
//! graduates them into long-term review.

pub mod import;
pub mod session;
pub mod study;
pub mod vocabulary;
