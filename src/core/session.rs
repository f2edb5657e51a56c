use crate::core::classifier::Classifier;
use crate::domain::model::ProductEntry;
use crate::utils::error::{LbasiError, Result};

/// Products collected before a diagnosis. Append-only until [`ProductList::clear`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductList {
    entries: Vec<ProductEntry>,
}

impl ProductList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single product. Text spanning several lines is rejected; use
    /// [`ProductList::append_text`] for blocks.
    pub fn append(&mut self, text: &str) -> Result<()> {
        if text.trim().contains(['\n', '\r']) {
            return Err(LbasiError::InvalidProductError {
                value: text.to_string(),
                reason: "one product per entry; the text spans several lines".to_string(),
            });
        }
        let entry = ProductEntry::new(text).ok_or(LbasiError::EmptyInput)?;
        tracing::debug!("Added product '{}'", entry);
        self.entries.push(entry);
        Ok(())
    }

    /// Splits a block of text the way `classifier` would and appends every
    /// product found. Returns how many were added.
    pub fn append_text(&mut self, classifier: &Classifier, text: &str) -> usize {
        let entries = classifier.normalize(text);
        let added = entries.len();
        self.entries.extend(entries);
        added
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn list(&self) -> &[ProductEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_clear() {
        let mut list = ProductList::new();
        list.append("레티놀 앰플").unwrap();
        list.append("  병풀 연고 ").unwrap();
        assert!(matches!(list.append("   "), Err(LbasiError::EmptyInput)));

        let texts: Vec<&str> = list.list().iter().map(|e| e.as_str()).collect();
        assert_eq!(texts, vec!["레티놀 앰플", "병풀 연고"]);

        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn test_append_rejects_multiline_text() {
        let mut list = ProductList::new();
        assert!(matches!(
            list.append("토너\n로션"),
            Err(LbasiError::InvalidProductError { .. })
        ));
        list.append("토너\n").unwrap();
        assert_eq!(list.list()[0].as_str(), "토너");
    }

    #[test]
    fn test_append_text_splits_lines() {
        let classifier = Classifier::default();
        let mut list = ProductList::new();
        assert_eq!(list.append_text(&classifier, "토너\n\n로션\n"), 2);
        assert_eq!(list.append_text(&classifier, "  "), 0);
        assert_eq!(list.len(), 2);
    }
}
