//! Word and sentence statistics comparing a summary with its source text.

/// Number of whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Number of `.`, `!` and `?` characters, used as a sentence-boundary proxy.
pub fn sentence_count(text: &str) -> usize {
    text.chars().filter(|c| matches!(c, '.' | '!' | '?')).count()
}

/// Percentage by which `summary` is shorter than `original`.
///
/// Zero when `original` is zero. Negative when the summary is longer.
pub fn reduction_pct(original: usize, summary: usize) -> f64 {
    if original == 0 {
        return 0.0;
    }
    100.0 * (1.0 - summary as f64 / original as f64)
}

/// Counts for one original/summary pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStats {
    pub original_words: usize,
    pub summary_words: usize,
    pub original_sentences: usize,
    pub summary_sentences: usize,
}

impl SummaryStats {
    pub fn compute(original: &str, summary: &str) -> Self {
        Self {
            original_words: word_count(original),
            summary_words: word_count(summary),
            original_sentences: sentence_count(original),
            summary_sentences: sentence_count(summary),
        }
    }

    pub fn word_reduction(&self) -> f64 {
        reduction_pct(self.original_words, self.summary_words)
    }

    pub fn sentence_reduction(&self) -> f64 {
        reduction_pct(self.original_sentences, self.summary_sentences)
    }

    /// The block appended below a summary in the display area.
    pub fn block(&self) -> String {
        format!(
            "\n---\nWord Count: {} \u{2192} {} ({:.1}% shorter)\nSentence Count: {} \u{2192} {} ({:.1}% shorter)\n",
            self.original_words,
            self.summary_words,
            self.word_reduction(),
            self.original_sentences,
            self.summary_sentences,
            self.sentence_reduction(),
        )
    }
}

/// Display text for a completed summary: the summary followed by its statistics.
pub fn with_stats(original: &str, summary: &str) -> String {
    let stats = SummaryStats::compute(original, summary);
    format!("{}{}", summary, stats.block())
}
