//! Free-text opinion attached to a transfer

/// Maximum comment length, in characters
pub const COMMENT_MAX_CHARS: usize = 2000;

/// Comment text capped at [`COMMENT_MAX_CHARS`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comment {
    text: String,
    truncated: bool,
}

impl Comment {
    /// Replace the text, cutting it to the limit.
    ///
    /// Counts Unicode scalar values, so multi-byte text is never split mid-character.
    pub fn set(&mut self, input: &str) {
        match input.char_indices().nth(COMMENT_MAX_CHARS) {
            Some((cut, _)) => {
                self.text = input[..cut].to_string();
                self.truncated = true;
            }
            None => {
                self.text = input.to_string();
                self.truncated = false;
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the last `set` had to drop characters
    pub fn was_truncated(&self) -> bool {
        self.truncated
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}
