// SPDX-FileCopyrightText: 2026 Kotae Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recursive character text splitter.
//!
//! Splits a document into chunks of at most `chunk_size` characters with
//! `chunk_overlap` characters carried between consecutive chunks.
//! Separators are tried coarsest-first (paragraph, line, word) so chunk
//! boundaries fall on natural breaks whenever possible; only text with no
//! separators at all is hard-split on character boundaries.
//!
//! Lengths are counted in characters, not bytes, so CJK corpus text
//! chunks the same way short ASCII text does.

use std::collections::VecDeque;

/// Separator preference, coarsest first. The empty string means
/// character-level hard splitting.
const SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

/// Character-count based recursive splitter.
#[derive(Debug, Clone)]
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextSplitter {
    /// Creates a splitter. The overlap is clamped below the chunk size.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        let chunk_overlap = chunk_overlap.min(chunk_size - 1);
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    /// Splits `text` into chunks, dropping whitespace-only chunks.
    pub fn split(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        let mut chunks = self.split_level(text, &SEPARATORS);
        chunks.retain(|c| !c.trim().is_empty());
        chunks
    }

    fn split_level(&self, text: &str, separators: &[&str]) -> Vec<String> {
        if char_len(text) <= self.chunk_size {
            return vec![text.to_string()];
        }

        let (sep, rest) = pick_separator(text, separators);
        if sep.is_empty() {
            return self.hard_split(text);
        }

        let pieces: Vec<String> = text.split(sep).map(str::to_string).collect();
        self.merge(pieces, sep, rest)
    }

    /// Character-boundary windows for text with no usable separator.
    fn hard_split(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let step = self.chunk_size - self.chunk_overlap;
        let mut out = Vec::new();
        let mut start = 0;
        while start < chars.len() {
            let end = (start + self.chunk_size).min(chars.len());
            out.push(chars[start..end].iter().collect());
            if end == chars.len() {
                break;
            }
            start += step;
        }
        out
    }

    /// Greedily merges split pieces back into chunks, carrying the
    /// overlap window between consecutive chunks.
    fn merge(&self, pieces: Vec<String>, sep: &str, rest: &[&str]) -> Vec<String> {
        let sep_len = char_len(sep);
        // Joined length of the current window, separators included.
        let joined = |piece_chars: usize, count: usize| {
            if count == 0 {
                0
            } else {
                piece_chars + sep_len * (count - 1)
            }
        };

        let mut chunks: Vec<String> = Vec::new();
        let mut window: VecDeque<String> = VecDeque::new();
        let mut window_chars = 0usize;

        for piece in pieces {
            let piece_len = char_len(&piece);

            if piece_len > self.chunk_size {
                // Too big to merge: flush what we have and recurse with
                // the finer separators.
                if !window.is_empty() {
                    chunks.push(join_window(&window, sep));
                    window.clear();
                    window_chars = 0;
                }
                chunks.extend(self.split_level(&piece, rest));
                continue;
            }

            if !window.is_empty()
                && joined(window_chars, window.len()) + sep_len + piece_len > self.chunk_size
            {
                chunks.push(join_window(&window, sep));
                // Shrink the front until the remainder fits the overlap
                // budget and leaves room for the incoming piece.
                while !window.is_empty()
                    && (joined(window_chars, window.len()) > self.chunk_overlap
                        || joined(window_chars, window.len()) + sep_len + piece_len
                            > self.chunk_size)
                {
                    if let Some(front) = window.pop_front() {
                        window_chars -= char_len(&front);
                    }
                }
            }

            window_chars += piece_len;
            window.push_back(piece);
        }

        if !window.is_empty() {
            chunks.push(join_window(&window, sep));
        }

        chunks
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn join_window(window: &VecDeque<String>, sep: &str) -> String {
    window.iter().cloned().collect::<Vec<_>>().join(sep)
}

/// First separator that occurs in the text, plus the finer ones after it.
fn pick_separator<'a>(text: &str, separators: &'a [&'a str]) -> (&'a str, &'a [&'a str]) {
    for (i, sep) in separators.iter().enumerate() {
        if sep.is_empty() || text.contains(sep) {
            return (sep, &separators[i + 1..]);
        }
    }
    ("", &[])
}
