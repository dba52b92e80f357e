//! Presentation cleanup applied before text reaches the index
//!
//! Rich-text editors leave characters in stored markup that only matter for
//! rendering: soft hyphens used as hyphenation hints, and zero-width fillers
//! inserted around the caret while typing. Left in place they split words in
//! the index ("docu\u{00AD}ment" would never match "document").

use content_index_config::CleanupConfig;

/// Collaborator that removes presentation-only characters from a string.
pub trait TextCleaner: Send + Sync {
    fn clean(&self, text: &str) -> String;
}

/// Default cleaner: drops the decorative marker and editor fillers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationCleanup {
    marker: char,
    fillers: Vec<char>,
}

impl PresentationCleanup {
    pub fn new(marker: char, fillers: Vec<char>) -> Self {
        Self { marker, fillers }
    }

    pub fn from_config(config: &CleanupConfig) -> Self {
        Self::new(config.marker, config.fillers.clone())
    }

    fn is_removed(&self, c: char) -> bool {
        c == self.marker || self.fillers.contains(&c)
    }
}

impl Default for PresentationCleanup {
    fn default() -> Self {
        Self::new('\u{00AD}', vec!['\u{200B}', '\u{2060}', '\u{FEFF}'])
    }
}

impl TextCleaner for PresentationCleanup {
    fn clean(&self, text: &str) -> String {
        text.chars().filter(|c| !self.is_removed(*c)).collect()
    }
}
