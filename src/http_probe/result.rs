/// What came back from a single probe.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResult {
    pub status_code: u16,
    pub body_text: String,
}

impl ProbeResult {
    /// The first `max_chars` characters of the body. Counts characters, not bytes.
    pub fn body_excerpt(&self, max_chars: usize) -> &str {
        match self.body_text.char_indices().nth(max_chars) {
            Some((idx, _)) => &self.body_text[..idx],
            None => &self.body_text,
        }
    }
}
