use serde::{Deserialize, Serialize};

/// Number of option axes a product may carry (Size, Color, Material, ...).
///
/// The generator itself accepts any number; the cap is applied where the
/// operator adds options and when a product is saved.
pub const MAX_OPTIONS: usize = 3;

/// Separator used by the option editor for its free-text value field.
pub const VALUE_SEPARATOR: char = ',';

/// A named axis of product variation, e.g. "Size" with values S, M, L.
///
/// `values` holds what the operator typed. Entries may themselves contain
/// comma-separated lists ("S, M, L"); see [`ProductOption::normalized_values`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOption {
    pub name: String,
    pub values: Vec<String>,
}

impl ProductOption {
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Build an option straight from the editor's comma-separated text field.
    pub fn from_csv(name: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: vec![raw.into()],
        }
    }

    /// Trimmed option name, or `None` when it is blank.
    pub fn label(&self) -> Option<&str> {
        let name = self.name.trim();
        (!name.is_empty()).then_some(name)
    }

    /// Split every entry on the separator, trim tokens, drop empty ones.
    ///
    /// Order is preserved and duplicates are kept: "S, M, S" yields three values.
    pub fn normalized_values(&self) -> Vec<String> {
        self.values
            .iter()
            .flat_map(|raw| raw.split(VALUE_SEPARATOR))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// True when the option has both a name and at least one value.
    pub fn is_complete(&self) -> bool {
        self.label().is_some() && !self.normalized_values().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_entry_is_split_and_trimmed() {
        let opt = ProductOption::from_csv("Size", "S, M, L");
        assert_eq!(opt.normalized_values(), vec!["S", "M", "L"]);
    }

    #[test]
    fn empty_tokens_are_dropped() {
        let opt = ProductOption::from_csv("Size", " ,S,, ,M, ");
        assert_eq!(opt.normalized_values(), vec!["S", "M"]);
    }

    #[test]
    fn duplicates_are_kept_in_order() {
        let opt = ProductOption::new("Color", ["Red", "Blue, Red"]);
        assert_eq!(opt.normalized_values(), vec!["Red", "Blue", "Red"]);
    }

    #[test]
    fn blank_name_has_no_label() {
        assert_eq!(ProductOption::from_csv("   ", "S").label(), None);
        assert_eq!(ProductOption::from_csv("  Size ", "S").label(), Some("Size"));
    }

    #[test]
    fn completeness_needs_name_and_values() {
        assert!(ProductOption::from_csv("Size", "S").is_complete());
        assert!(!ProductOption::from_csv("", "S").is_complete());
        assert!(!ProductOption::from_csv("Size", " , ").is_complete());
    }
}
