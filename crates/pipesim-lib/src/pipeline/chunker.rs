use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{MIN_TAIL_CHUNK_CHARS, SMART_MIN_FILL_RATIO};

/// Split boundaries for smart chunking, highest priority first. Each group
/// is searched as a whole; the nearest occurrence within the group wins.
const SMART_DELIMITERS: [&[&str]; 5] = [&["\n\n"], &["\n"], &[". ", "! ", "? "], &[", "], &[" "]];

/// Chunking parameters. All sizes are in characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ChunkConfig {
    pub size: usize,
    pub overlap: usize,
    /// Snap chunk ends to paragraph / line / sentence / word boundaries.
    pub smart: bool,
}

impl ChunkConfig {
    /// Validate and build a configuration.
    ///
    /// A zero `size` is rejected. An `overlap` that is not smaller than `size`
    /// is clamped to `size - 1`.
    pub fn new(size: usize, overlap: usize, smart: bool) -> anyhow::Result<Self> {
        if size == 0 {
            anyhow::bail!("chunk size must be greater than zero");
        }
        let clamped = overlap.min(size - 1);
        if clamped != overlap {
            warn!(size, overlap, clamped, "overlap not smaller than chunk size; clamping");
        }
        Ok(Self {
            size,
            overlap: clamped,
            smart,
        })
    }

    /// Distance between consecutive fixed-stride window starts.
    #[must_use]
    pub fn stride(&self) -> usize {
        self.size.saturating_sub(self.overlap).max(1)
    }
}

/// A contiguous piece of the source text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Chunk {
    /// Sequential chunk index (0-based).
    pub chunk_index: usize,
    /// Character offset of `text` within the source.
    pub start: usize,
    /// The text content of this chunk.
    pub text: String,
}

/// Split `text` into chunks according to `config`.
///
/// Both modes return chunks in source order and always terminate; see
/// [`chunk_fixed`] and [`chunk_smart`] for the per-mode rules.
#[must_use]
pub fn chunk(text: &str, config: &ChunkConfig) -> Vec<Chunk> {
    let chars: Vec<char> = text.chars().collect();
    let pieces = if config.smart {
        chunk_smart(&chars, config)
    } else {
        chunk_fixed(&chars, config)
    };

    pieces
        .into_iter()
        .enumerate()
        .map(|(chunk_index, (start, text))| Chunk {
            chunk_index,
            start,
            text,
        })
        .collect()
}

/// Slide a `size`-wide window with the configured stride.
///
/// An undersized window past the first one ends chunking when fewer than
/// [`MIN_TAIL_CHUNK_CHARS`] non-blank characters remain in it.
fn chunk_fixed(chars: &[char], config: &ChunkConfig) -> Vec<(usize, String)> {
    let mut out = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let end = (i + config.size).min(chars.len());
        let window: String = chars[i..end].iter().collect();

        if end - i < config.size && i > 0 && window.trim().chars().count() < MIN_TAIL_CHUNK_CHARS {
            debug!(start = i, len = end - i, "dropping short tail chunk");
            break;
        }
        out.push((i, window));
        i += config.stride();
    }

    out
}

/// Boundary-aware chunking.
///
/// Each window ends at the best delimiter found in its second half (or at
/// `size` when there is none), is trimmed, and is dropped if blank. The next
/// window either backs up by `overlap` or skips the whitespace after the
/// cut; its start is always strictly past the previous start.
fn chunk_smart(chars: &[char], config: &ChunkConfig) -> Vec<(usize, String)> {
    let len = chars.len();
    let mut out = Vec::new();
    let mut start = 0;

    while start < len {
        let mut end = (start + config.size).min(len);
        if end < len
            && let Some(cut) = find_boundary(chars, start, end, config.size)
        {
            end = cut;
        }

        let window = &chars[start..end];
        let lead = window.iter().take_while(|c| c.is_whitespace()).count();
        let text: String = window.iter().collect::<String>().trim().to_string();
        if !text.is_empty() {
            out.push((start + lead, text));
        }

        if end >= len {
            break;
        }

        let next = if config.overlap > 0 {
            end.saturating_sub(config.overlap)
        } else {
            end + chars[end..].iter().take_while(|c| c.is_whitespace()).count()
        };
        start = next.max(start + 1);
    }

    out
}

/// Find the window end just past the preferred delimiter in
/// `chars[start..end]`, ignoring any delimiter that would leave the chunk
/// shorter than [`SMART_MIN_FILL_RATIO`] of `size`.
fn find_boundary(chars: &[char], start: usize, end: usize, size: usize) -> Option<usize> {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let min_offset = (size as f64 * SMART_MIN_FILL_RATIO).ceil() as usize;
    let window = &chars[start..end];

    for group in SMART_DELIMITERS {
        let best = group
            .iter()
            .filter_map(|delim| {
                let pattern: Vec<char> = delim.chars().collect();
                rfind(window, &pattern).map(|pos| (pos, pattern.len()))
            })
            .max_by_key(|&(pos, _)| pos);

        if let Some((pos, delim_len)) = best
            && pos >= min_offset
        {
            debug!(start, cut = start + pos + delim_len, "smart chunk boundary");
            return Some(start + pos + delim_len);
        }
    }
    None
}

/// Position of the last complete occurrence of `pattern` in `haystack`.
fn rfind(haystack: &[char], pattern: &[char]) -> Option<usize> {
    if pattern.is_empty() || pattern.len() > haystack.len() {
        return None;
    }
    (0..=haystack.len() - pattern.len())
        .rev()
        .find(|&i| haystack[i..i + pattern.len()] == *pattern)
}
