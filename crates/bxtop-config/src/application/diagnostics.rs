//! Ordered warning and info lists collected while loading.
//!
//! Loading never stops at the first problem: every stage appends to a
//! [`Diagnostics`] value and the UI layer shows the whole list once startup
//! is done.  Warnings describe a rejected or repaired value; infos describe
//! whole-file conditions such as a version mismatch.

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Diagnostics {
    warnings: Vec<String>,
    info: Vec<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn note(&mut self, message: impl Into<String>) {
        self.info.push(message.into());
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn info(&self) -> &[String] {
        &self.info
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty() && self.info.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_keep_insertion_order() {
        let mut diag = Diagnostics::new();
        diag.warn("first");
        diag.note("info");
        diag.warn("second");

        assert_eq!(diag.warnings(), ["first", "second"]);
        assert_eq!(diag.info(), ["info"]);
        assert!(!diag.is_empty());
    }
}
