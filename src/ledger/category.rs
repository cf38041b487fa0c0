//! Canonical display names for categories.

use std::collections::HashMap;

/// Maps a lowercase, trimmed category key onto the spelling shown to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryNormalizer {
    canonical: HashMap<String, String>,
}

fn category_key(value: &str) -> String {
    value.trim().to_lowercase()
}

impl CategoryNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the table from existing category values.
    ///
    /// Each key keeps its most frequent trimmed spelling; on a tie the
    /// spelling seen first wins. Empty values are ignored.
    pub fn build<'a, I>(categories: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        // key -> spellings in first-seen order with their counts
        let mut variations: HashMap<String, Vec<(String, usize)>> = HashMap::new();
        for raw in categories {
            let spelling = raw.trim();
            if spelling.is_empty() {
                continue;
            }
            let counts = variations.entry(category_key(spelling)).or_default();
            match counts.iter_mut().find(|(seen, _)| seen == spelling) {
                Some((_, count)) => *count += 1,
                None => counts.push((spelling.to_string(), 1)),
            }
        }

        let canonical = variations
            .into_iter()
            .filter_map(|(key, counts)| {
                let mut best: Option<(String, usize)> = None;
                for (spelling, count) in counts {
                    if best.as_ref().map_or(true, |(_, top)| count > *top) {
                        best = Some((spelling, count));
                    }
                }
                best.map(|(spelling, _)| (key, spelling))
            })
            .collect();

        Self { canonical }
    }

    /// Returns the canonical spelling for `value`, registering unseen
    /// categories under their trimmed spelling. Empty input is returned as is.
    pub fn normalize(&mut self, value: &str) -> String {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return value.to_string();
        }
        self.canonical
            .entry(category_key(trimmed))
            .or_insert_with(|| trimmed.to_string())
            .clone()
    }

    /// Looks up the canonical spelling without registering anything.
    pub fn canonical(&self, value: &str) -> Option<&str> {
        self.canonical.get(&category_key(value)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn most_frequent_spelling_wins() {
        let mut normalizer =
            CategoryNormalizer::build(["groceries", "Groceries", "Groceries", "Groceries"]);
        assert_eq!(normalizer.normalize("groceries"), "Groceries");
        assert_eq!(normalizer.normalize("  GROCERIES "), "Groceries");
        assert_eq!(normalizer.len(), 1);
    }

    #[test]
    fn ties_keep_first_seen_spelling() {
        let normalizer = CategoryNormalizer::build(["rent", "Rent", "RENT", "Rent", "rent"]);
        assert_eq!(normalizer.canonical("Rent"), Some("rent"));
    }

    #[test]
    fn spellings_are_trimmed_before_counting() {
        let normalizer = CategoryNormalizer::build([" Travel", "Travel ", "travel"]);
        assert_eq!(normalizer.canonical("travel"), Some("Travel"));
    }

    #[test]
    fn unseen_category_registers_trimmed_spelling() {
        let mut normalizer = CategoryNormalizer::new();
        assert_eq!(normalizer.normalize("  Pet Care "), "Pet Care");
        assert_eq!(normalizer.normalize("pet care"), "Pet Care");
        assert_eq!(normalizer.len(), 1);
    }

    #[test]
    fn empty_input_passes_through_untouched() {
        let mut normalizer = CategoryNormalizer::new();
        assert_eq!(normalizer.normalize("   "), "   ");
        assert!(normalizer.is_empty());
    }

    #[test]
    fn normalize_is_idempotent() {
        let mut normalizer = CategoryNormalizer::build(["Food", "food", "FOOD", "Food"]);
        for input in ["food", " Food", "FOOD", "Books", "books "] {
            let once = normalizer.normalize(input);
            assert_eq!(normalizer.normalize(&once), once);
        }
    }
}
