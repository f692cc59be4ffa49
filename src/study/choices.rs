use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::vocabulary::VocabularyItem;

/// Wrong answers shown next to the right one
pub const DISTRACTOR_COUNT: usize = 3;

const ORDER_SEED_MASK: u64 = 0xDEAD_BEEF;

fn item_seed(item: &VocabularyItem) -> u64 {
    let bits = item.id.as_u128();
    (bits >> 64) as u64 ^ bits as u64
}

/// Multiple-choice options for `item`, drawn from `pool`.
///
/// Both the distractors and the final order depend only on the item id and
/// the pool, so re-rendering the same question shows the same options.
/// With fewer than three other items the only option is the item itself.
pub fn choice_options<'a>(item: &'a VocabularyItem, pool: &'a [VocabularyItem]) -> Vec<&'a VocabularyItem> {
    let mut others: Vec<&VocabularyItem> = pool.iter().filter(|other| other.id != item.id).collect();
    if others.len() < DISTRACTOR_COUNT {
        return vec![item];
    }

    let seed = item_seed(item);
    others.shuffle(&mut StdRng::seed_from_u64(seed));
    others.truncate(DISTRACTOR_COUNT);
    others.push(item);
    others.shuffle(&mut StdRng::seed_from_u64(seed ^ ORDER_SEED_MASK));
    others
}

/// Compare a typed answer, ignoring case and surrounding whitespace
pub fn answer_matches(input: &str, expected: &str) -> bool {
    input.trim().to_lowercase() == expected.trim().to_lowercase()
}
