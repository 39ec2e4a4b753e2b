use std::collections::HashMap;

use strsim::levenshtein;

/// Frequency-ranked English word list, one `word count` pair per
/// line. Derived from a spell-checker dictionary with occurrence
/// counts taken from a large prose corpus, so essentially any
/// correctly spelled word is present.
static DICTIONARY: &str = include_str!("../../assets/word_frequencies.txt");

/// A dictionary-based spelling corrector. For each token it finds the
/// closest known word within a small edit distance, preferring more
/// frequent words on ties. Tokens it can't improve are left alone.
pub struct SpellingModel {
    words: Vec<(String, u64)>,
    known: HashMap<String, u64>,
}

impl SpellingModel {
    #[must_use]
    pub fn from_embedded_dictionary() -> Self {
        Self::from_dictionary(DICTIONARY)
    }

    /// Build a model from any `word count` list. Mostly useful for
    /// exercising the correction rules against a small, controlled
    /// vocabulary.
    #[must_use]
    pub fn from_dictionary(contents: &str) -> Self {
        let mut words = Vec::new();
        let mut known = HashMap::new();

        for line in contents.lines() {
            let mut parts = line.split_whitespace();
            let (Some(word), Some(count)) = (parts.next(), parts.next()) else {
                continue;
            };
            let Ok(count) = count.parse::<u64>() else {
                continue;
            };

            if known.contains_key(word) {
                continue;
            }

            known.insert(word.to_string(), count);
            words.push((word.to_string(), count));
        }

        Self { words, known }
    }

    /// Correct a whole blob of text, token by token, preserving the
    /// whitespace-separated token structure.
    #[must_use]
    pub fn correct_text(&self, text: &str) -> String {
        text.split_whitespace()
            .map(|token| self.correct_token(token))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Correct a single token. Known words, non-alphabetic tokens and
    /// tokens with no close-enough dictionary neighbor come back
    /// unchanged.
    #[must_use]
    pub fn correct_token(&self, token: &str) -> String {
        if !token.chars().all(|c| c.is_ascii_alphabetic()) {
            // Numbers, punctuation, emoji... not our department.
            return token.to_string();
        }

        let lowercase = token.to_lowercase();
        if self.known.contains_key(&lowercase) {
            return token.to_string();
        }

        // Short tokens get a tighter distance bound, otherwise "cta"
        // could become just about anything.
        let max_distance = if lowercase.chars().count() < 4 { 1 } else { 2 };

        // Words whose length is too far off can't be within range;
        // skip them before paying for the distance computation.
        let best = self
            .words
            .iter()
            .filter(|(word, _)| word.len().abs_diff(lowercase.len()) <= max_distance)
            .map(|(word, count)| (levenshtein(&lowercase, word), word, count))
            .filter(|(distance, _, _)| *distance <= max_distance)
            .min_by(|a, b| a.0.cmp(&b.0).then(b.2.cmp(a.2)));

        let Some((_, correction, _)) = best else {
            return token.to_string();
        };

        let mut corrected = correction.clone();

        // Pluralization-preserving heuristic: a correction shouldn't
        // silently drop a plural the speaker clearly intended.
        if corrected.ends_with('e') && lowercase.ends_with("es") {
            corrected.push('s');
        } else if lowercase.ends_with('s') && !corrected.ends_with('s') {
            corrected.push('s');
        }

        corrected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correcting_common_misspellings() {
        let model = SpellingModel::from_embedded_dictionary();
        assert_eq!(
            model.correct_text("speling mistaks are commmon"),
            "spelling mistakes are common"
        );
    }

    #[test]
    fn known_and_unknown_tokens_kept() {
        let model = SpellingModel::from_embedded_dictionary();
        // Already correct: untouched.
        assert_eq!(model.correct_token("common"), "common");
        // Nothing close enough in the dictionary: untouched.
        assert_eq!(model.correct_token("zzzzzzzzzzzz"), "zzzzzzzzzzzz");
        // Non-alphabetic: untouched.
        assert_eq!(model.correct_token("42"), "42");
        assert_eq!(model.correct_token("don't"), "don't");
    }

    #[test]
    fn valid_words_survive_a_pass() {
        let model = SpellingModel::from_embedded_dictionary();
        // Correctly spelled text must come through unscathed, even
        // short words sitting close to other dictionary entries.
        assert_eq!(model.correct_token("fox"), "fox");
        assert_eq!(
            model.correct_text("the quick brown fox jumps over the lazy dog"),
            "the quick brown fox jumps over the lazy dog"
        );
    }

    #[test]
    fn plural_preserved_through_correction() {
        // A controlled vocabulary, so the correction target is known.
        let model = SpellingModel::from_dictionary("horse 100\nmistake 100\n");
        // "horse" ends in "e" and the token ends in "es": the special
        // case puts the plural back after correction.
        assert_eq!(model.correct_token("horrses"), "horses");
        // "mistaks" corrects to "mistake"; generic s-appending rule.
        assert_eq!(model.correct_token("mistaks"), "mistakes");
    }
}
