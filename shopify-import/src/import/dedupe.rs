//! First-seen handle filter for the catalog import

use std::collections::HashSet;

/// Why a row was dropped before transformation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    EmptyHandle,
    Duplicate,
}

/// Keeps the first row for each product handle
#[derive(Debug, Default)]
pub struct HandleFilter {
    seen: HashSet<String>,
}

impl HandleFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit a handle, marking it seen. Blank and repeated handles are rejected.
    pub fn admit(&mut self, handle: Option<&str>) -> Result<(), SkipReason> {
        let handle = handle.map(str::trim).unwrap_or_default();
        if handle.is_empty() {
            return Err(SkipReason::EmptyHandle);
        }
        if !self.seen.insert(handle.to_string()) {
            return Err(SkipReason::Duplicate);
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }
}
