// matcher.rs - Whole-word protein family matching

use crate::data::ProteinFamilies;
use regex::Regex;

/// Case-insensitive whole-word matcher for a family list.
///
/// Each family name is escaped and compiled once into a `\b...\b` pattern,
/// so punctuation in a name is matched verbatim.
#[derive(Debug, Clone)]
pub struct FamilyMatcher {
    patterns: Vec<(String, Regex)>,
}

impl FamilyMatcher {
    pub fn new(families: &ProteinFamilies) -> Result<Self, String> {
        Self::from_names(families.names())
    }

    fn from_names(names: &[String]) -> Result<Self, String> {
        let patterns = names
            .iter()
            .map(|name| {
                let pattern = format!(r"(?i)\b{}\b", regex::escape(name));
                Regex::new(&pattern)
                    .map(|re| (name.clone(), re))
                    .map_err(|e| format!("Invalid pattern for protein family '{}': {}", name, e))
            })
            .collect::<Result<Vec<_>, String>>()?;

        Ok(Self { patterns })
    }

    /// Families mentioned in `description`, in family-list order
    pub fn find_families(&self, description: &str) -> Vec<&str> {
        self.patterns
            .iter()
            .filter(|(_, re)| re.is_match(description))
            .map(|(name, _)| name.as_str())
            .collect()
    }

}

/// One-off matching without a precompiled matcher
pub fn find_families(description: &str, families: &[String]) -> Result<Vec<String>, String> {
    let matcher = FamilyMatcher::from_names(families)?;
    Ok(matcher
        .find_families(description)
        .into_iter()
        .map(str::to_string)
        .collect())
}
