//! Character-budgeted chunking used to build the retrieval index
//!
//! `semchunk` picks the boundaries (paragraphs, then lines, then words, then
//! characters) with a character counter. Each chunk is then prefixed with the
//! word-aligned tail of its predecessor so spans across a boundary stay
//! retrievable. Base chunks are cut at `chunk_size - chunk_overlap`, which
//! keeps every overlapped chunk within `chunk_size`.

use semchunk_rs::Chunker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Default for TextSplitter {
    fn default() -> Self {
        Self::new(800, 250)
    }
}

impl TextSplitter {
    /// Sizes are in characters. Overlap is clamped below the chunk size.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            chunk_size,
            chunk_overlap: chunk_overlap.min(chunk_size - 1),
        }
    }

    /// Returns an empty vector for blank input.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let chunker = Chunker::new(
            self.chunk_size - self.chunk_overlap,
            Box::new(|segment: &str| char_len(segment)),
        );
        let base_chunks: Vec<String> = chunker
            .chunk(text)
            .into_iter()
            .map(|chunk| chunk.trim().to_string())
            .filter(|chunk| !chunk.is_empty())
            .collect();

        self.apply_overlap(base_chunks)
    }

    fn apply_overlap(&self, chunks: Vec<String>) -> Vec<String> {
        if self.chunk_overlap == 0 {
            return chunks;
        }

        let mut overlapped = Vec::with_capacity(chunks.len());
        let mut previous: Option<String> = None;

        for current in chunks {
            let chunk = match &previous {
                Some(prev) => {
                    // one char is reserved for the joining space
                    let budget = self
                        .chunk_overlap
                        .min(self.chunk_size.saturating_sub(char_len(&current) + 1));
                    let tail = word_aligned_tail(prev, budget);
                    if tail.is_empty() {
                        current.clone()
                    } else {
                        format!("{} {}", tail, current)
                    }
                }
                None => current.clone(),
            };
            overlapped.push(chunk);
            previous = Some(current);
        }

        overlapped
    }
}

/// Longest suffix of `text` within `limit` chars that starts on a word boundary
fn word_aligned_tail(text: &str, limit: usize) -> &str {
    if limit == 0 {
        return "";
    }
    if char_len(text) <= limit {
        return text.trim_start();
    }

    let skip = char_len(text) - limit;
    let Some((cut, _)) = text.char_indices().nth(skip) else {
        return "";
    };

    let starts_word = text[..cut]
        .chars()
        .next_back()
        .map_or(true, char::is_whitespace);
    let tail = &text[cut..];
    let tail = if starts_word {
        tail
    } else {
        match tail.find(char::is_whitespace) {
            Some(offset) => &tail[offset..],
            None => "",
        }
    };
    tail.trim_start()
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}
