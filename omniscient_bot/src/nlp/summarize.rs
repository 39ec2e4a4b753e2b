use std::collections::HashMap;

use nalgebra::DMatrix;

/// Extractive LSA summarization: build a term-sentence frequency
/// matrix, take its SVD, score each sentence across the top singular
/// vectors (Steinberger-Jezek style), and keep the best `target`
/// sentences in their original order.
///
/// Text with no more than `target` sentences comes back as-is.
#[must_use]
pub fn summarize(text: &str, target: usize) -> String {
    let sentences = split_sentences(text);

    if target == 0 {
        return String::new();
    }
    if sentences.len() <= target {
        return sentences.join(" ");
    }

    let Some(matrix) = term_sentence_matrix(&sentences) else {
        // No usable vocabulary at all. Take the leading sentences.
        return sentences[..target].join(" ");
    };

    let svd = matrix.svd(false, true);
    let v_t = svd
        .v_t
        .expect("SVD computed with v_t requested always has v_t");
    let singular_values = svd.singular_values;

    let concepts = singular_values.len().min(target);

    let mut scored: Vec<(usize, f64)> = (0..sentences.len())
        .map(|sentence| {
            let score = (0..concepts)
                .map(|concept| {
                    let weighted = singular_values[concept] * v_t[(concept, sentence)];
                    weighted * weighted
                })
                .sum::<f64>()
                .sqrt();
            (sentence, score)
        })
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut selected: Vec<usize> = scored.iter().take(target).map(|(i, _)| *i).collect();
    // Original relative order, not score order.
    selected.sort_unstable();

    selected
        .into_iter()
        .map(|i| sentences[i].as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split text into sentences on terminal punctuation, keeping the
/// terminator attached to its sentence.
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();

    for c in text.chars() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') {
            let trimmed = current.trim();
            if !trimmed.is_empty() {
                sentences.push(trimmed.to_string());
            }
            current.clear();
        }
    }

    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }

    sentences
}

/// Term-sentence frequency matrix over lowercased alphabetic tokens.
/// Returns [`None`] if there are no terms to count.
fn term_sentence_matrix(sentences: &[String]) -> Option<DMatrix<f64>> {
    let mut term_rows: HashMap<String, usize> = HashMap::new();

    let tokenized: Vec<Vec<String>> = sentences
        .iter()
        .map(|sentence| {
            sentence
                .split(|c: char| !c.is_alphanumeric())
                .filter(|token| !token.is_empty())
                .map(str::to_lowercase)
                .collect()
        })
        .collect();

    for tokens in &tokenized {
        for token in tokens {
            let next_row = term_rows.len();
            term_rows.entry(token.clone()).or_insert(next_row);
        }
    }

    if term_rows.is_empty() {
        return None;
    }

    let mut matrix = DMatrix::<f64>::zeros(term_rows.len(), sentences.len());
    for (column, tokens) in tokenized.iter().enumerate() {
        for token in tokens {
            let row = term_rows[token];
            matrix[(row, column)] += 1.0;
        }
    }

    Some(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_returned_whole() {
        let text = "One sentence. Two sentences.";
        assert_eq!(summarize(text, 5), text);
    }

    #[test]
    fn long_text_reduced_in_original_order() {
        let text = "The cat sat on the mat. Dogs bark at the moon. \
                    The cat chased the dog around the mat. \
                    Economics is the study of scarcity. \
                    The cat and the dog shared the mat in the end. \
                    Rainfall in spring is unpredictable. \
                    The mat belonged to the cat all along.";
        let summary = summarize(text, 3);

        let kept = split_sentences(&summary);
        assert_eq!(kept.len(), 3);

        // Whatever was kept must appear in the same relative order
        // as in the source text.
        let source = split_sentences(text);
        let positions: Vec<usize> = kept
            .iter()
            .map(|sentence| source.iter().position(|s| s == sentence).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn zero_target_is_empty() {
        assert_eq!(summarize("Anything at all.", 0), "");
    }

    #[test]
    fn sentence_splitting() {
        assert_eq!(
            split_sentences("One. Two! Three? Four"),
            vec!["One.", "Two!", "Three?", "Four"]
        );
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("  ").is_empty());
    }
}
