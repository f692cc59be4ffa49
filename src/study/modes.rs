use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::vocabulary::VocabularyItem;

/// Ways an item can be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StudyMode {
    /// Show one side, flip to reveal the other
    FlipCard,
    /// Pick the matching word from four options
    MultipleChoice,
    /// Hear the word first, then pick its meaning
    AudioFirst,
    /// Type the answer
    TypedAnswer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StudyDirection {
    /// Prompt with the translation, answer in the target language
    TranslationToNative,
    /// Prompt with the target language, answer with the translation
    NativeToTranslation,
}

impl StudyDirection {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            StudyDirection::TranslationToNative
        } else {
            StudyDirection::NativeToTranslation
        }
    }
}

/// Uniform pick among the enabled modes
pub fn choose_mode<R: Rng + ?Sized>(enabled: &[StudyMode], rng: &mut R) -> Option<StudyMode> {
    enabled.choose(rng).copied()
}

/// Prompt and expected answer for typed-answer mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedPrompt {
    pub prompt: String,
    pub expected: String,
}

pub fn typed_prompt(item: &VocabularyItem, direction: StudyDirection) -> TypedPrompt {
    match direction {
        StudyDirection::TranslationToNative => TypedPrompt {
            prompt: item.translation_text.clone(),
            expected: item.phonetic_text.clone(),
        },
        StudyDirection::NativeToTranslation => TypedPrompt {
            prompt: format!("{} {}", item.native_text, item.phonetic_text),
            expected: item.translation_text.clone(),
        },
    }
}
