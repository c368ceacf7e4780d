//! Capture groups recorded when a pattern expression matches.

use regex::bytes::Captures;

use crate::error::{EditError, EditResult};

/// The bytes a pattern matched plus the offsets of its capture groups.
///
/// Offsets are relative to the matched bytes, so the captures stay valid no
/// matter how the buffer changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    text: Vec<u8>,
    /// Group 0 is the whole match; unmatched optional groups are `None`
    groups: Vec<Option<(usize, usize)>>,
}

impl PatternMatch {
    pub fn new(text: Vec<u8>, groups: Vec<Option<(usize, usize)>>) -> Self {
        Self { text, groups }
    }

    pub fn from_captures(captures: &Captures<'_>) -> Self {
        let Some(whole) = captures.get(0) else {
            return Self::new(Vec::new(), Vec::new());
        };
        let base = whole.start();
        let groups = captures
            .iter()
            .map(|group| group.map(|m| (m.start() - base, m.end() - base)))
            .collect();
        Self::new(whole.as_bytes().to_vec(), groups)
    }

    /// Number of capture groups, not counting the whole match
    pub fn number_of_matches(&self) -> usize {
        self.groups.len().saturating_sub(1)
    }

    /// Bytes of group `index` (0 is the whole match).
    ///
    /// Out-of-range or unmatched groups give an empty slice.
    pub fn get_match(&self, index: usize) -> &[u8] {
        match self.groups.get(index) {
            Some(Some((start, end))) => &self.text[*start..*end],
            _ => &[],
        }
    }

    /// Expand `$<n>` markers in `template` with the matching capture.
    ///
    /// A `$` not followed by a digit is copied through.
    pub fn instantiate_template(&self, template: &str) -> EditResult<Vec<u8>> {
        let bytes = template.as_bytes();
        let mut out = Vec::with_capacity(bytes.len());
        let mut i = 0;
        while i < bytes.len() {
            let c = bytes[i];
            let digits = bytes[i + 1..]
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .count();
            if c != b'$' || digits == 0 {
                out.push(c);
                i += 1;
                continue;
            }
            let index = bytes[i + 1..i + 1 + digits]
                .iter()
                .fold(0usize, |acc, d| {
                    acc.saturating_mul(10).saturating_add((d - b'0') as usize)
                });
            if index > self.number_of_matches() {
                return Err(EditError::InvalidReplacement { index });
            }
            out.extend_from_slice(self.get_match(index));
            i += 1 + digits;
        }
        Ok(out)
    }
}
