//! Delta computation over the engine's accumulated output

/// Canonical marker of a multi-byte character decoded mid-codepoint.
const REPLACEMENT: char = '\u{fffd}';

/// Tracks how much of the accumulated snapshot has been flushed to the
/// wire. Owned by one session; reset per request.
#[derive(Debug, Default)]
pub struct ChunkCursor {
    sent: usize,
}

impl ChunkCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes of accumulated output already flushed.
    pub fn sent(&self) -> usize {
        self.sent
    }

    /// Compute the unsent suffix of `snapshot` and advance past it.
    ///
    /// Returns `None` without advancing when there is nothing new, or when
    /// the suffix contains U+FFFD: the tail of the snapshot ends inside a
    /// multi-byte character, and a later snapshot will complete it.
    pub fn next_chunk<'a>(&mut self, snapshot: &'a str) -> Option<&'a str> {
        let candidate = snapshot.get(self.sent..)?;
        if candidate.is_empty() || candidate.contains(REPLACEMENT) {
            return None;
        }
        self.sent += candidate.len();
        Some(candidate)
    }
}
