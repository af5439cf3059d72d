// families.rs - Protein family keyword lists

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Built-in family list, in table row order
pub const DEFAULT_FAMILIES: [&str; 25] = [
    "Adhesin",
    "Cadherin",
    "Catenin",
    "Collagen",
    "Fibronectin",
    "Alpha catulin",
    "Adhesion",
    "Claudin",
    "GAIN domain",
    "Immunoglobulin",
    "Integrin",
    "Intercellular adhesion molecule",
    "Invasin",
    "Laminin",
    "Lectin",
    "Plekstrin Homology Domain",
    "Selectin",
    "Triple Helix Repeat",
    "Vimentin",
    "Protocadherin",
    "Dystrophin",
    "Cell-cell adhesion",
    "Bacteria adhesin",
    "Aggrecan",
    "Adhesion GPCr",
];

/// Ordered list of protein family names.
///
/// Order determines the row order of the summary table. Names are unique
/// under case-insensitive comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProteinFamilies {
    names: Vec<String>,
}

impl ProteinFamilies {
    /// Build a family list, rejecting empty lists and duplicates
    pub fn from_names<I, S>(names: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err("Protein family list is empty".to_string());
        }

        let mut seen: HashMap<String, usize> = HashMap::new();
        for (idx, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(format!("Protein family #{} is blank", idx + 1));
            }
            if let Some(first) = seen.insert(name.to_lowercase(), idx) {
                return Err(format!(
                    "Duplicate protein family '{}' (entries #{} and #{})",
                    name,
                    first + 1,
                    idx + 1
                ));
            }
        }

        Ok(Self { names })
    }

    /// Load a custom family list (one name per line, file order preserved)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| format!("Failed to open protein family file '{}': {}", path.display(), e))?;

        let reader = BufReader::new(file);
        let mut names = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                format!("Failed to read line {} from '{}': {}", line_num + 1, path.display(), e)
            })?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            names.push(trimmed.to_string());
        }

        let families = Self::from_names(names)
            .map_err(|e| format!("Invalid protein family file '{}': {}", path.display(), e))?;
        println!("📋 Loaded {} protein families from '{}'", families.len(), path.display());
        Ok(families)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.names.iter()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for ProteinFamilies {
    fn default() -> Self {
        Self {
            names: DEFAULT_FAMILIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ProteinFamilies {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}
