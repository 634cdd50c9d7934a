use crate::error::{Result, SheetError};

/// Picks the sheet to process by case-insensitive substring match against a
/// set of aliases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLocator {
    aliases: Vec<String>,
}

impl SheetLocator {
    /// Create a locator from aliases; blank aliases are ignored.
    pub fn new<S: AsRef<str>>(aliases: &[S]) -> Self {
        SheetLocator {
            aliases: aliases
                .iter()
                .map(|alias| alias.as_ref().trim().to_lowercase())
                .filter(|alias| !alias.is_empty())
                .collect(),
        }
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Whether a sheet name matches any alias
    pub fn matches(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.aliases.iter().any(|alias| name.contains(alias.as_str()))
    }

    /// The first matching name in the given order.
    ///
    /// Fails with [`SheetError::SheetNotFound`] listing every available name.
    pub fn locate<'a>(&self, names: &'a [String]) -> Result<&'a str> {
        names
            .iter()
            .find(|name| self.matches(name))
            .map(String::as_str)
            .ok_or_else(|| SheetError::SheetNotFound {
                targets: self.aliases.clone(),
                available: names.to_vec(),
            })
    }
}
