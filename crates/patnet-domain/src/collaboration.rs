//! Entities, categories and collaboration edge pairs

use std::fmt;

/// A canonical company name
///
/// Identity is exact string equality; no fuzzy matching happens here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity(String);

impl Entity {
    /// Create a new entity
    ///
    /// # Errors
    /// Returns error if the name is empty or only whitespace
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Entity name cannot be empty".to_string());
        }
        Ok(Self(name))
    }

    /// Get the name as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Representative technology class of a publication (a single symbol, e.g. `G`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Category(char);

impl Category {
    /// Create a category from its class symbol
    pub fn new(symbol: char) -> Self {
        Self(symbol)
    }

    /// The class symbol
    pub fn symbol(&self) -> char {
        self.0
    }

    /// Edge label text for this category
    pub fn label(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index pairs for `n` parties of one publication
///
/// Two parties give a single pair; more than two give a cycle over the
/// parties in order (each consecutive pair plus last to first), so N
/// parties yield N pairs. Fewer than two give none.
pub fn cycle_pairs(n: usize) -> Vec<(usize, usize)> {
    match n {
        0 | 1 => Vec::new(),
        2 => vec![(0, 1)],
        _ => (0..n).map(|i| (i, (i + 1) % n)).collect(),
    }
}
