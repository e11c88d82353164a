//! Cuisine vocabulary for `/random`.

use rand::Rng;

/// Terms `/random` picks from.
pub const CUISINES: &[&str] = &[
    "mexican", "indian", "breakfast", "cafe", "seafood",
    "chinese", "japanese", "thai", "vietnamese", "ethiopian",
    "american", "burgers", "gastropub", "sandwiches", "filipino",
    "ramen", "pho", "french", "greek", "german",
    "moroccan", "soul food", "cajun", "caribbean",
    "turkish", "spanish", "italian", "korean", "lebanese",
    "hawaiian", "jamaican", "brazilian", "british", "mediterranean",
];

/// Pick a cuisine uniformly at random.
///
/// Uses the thread-local generator, which is seeded once per thread.
pub fn random_cuisine() -> &'static str {
    let idx = rand::rng().random_range(0..CUISINES.len());
    CUISINES[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_cuisine_is_from_vocabulary() {
        for _ in 0..200 {
            assert!(CUISINES.contains(&random_cuisine()));
        }
    }

    #[test]
    fn test_vocabulary_has_no_duplicates() {
        let mut sorted = CUISINES.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), CUISINES.len());
    }
}
