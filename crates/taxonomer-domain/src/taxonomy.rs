//! Taxonomy module - classification dimensions and their prompt instructions

use serde::{Deserialize, Serialize};

/// Built-in classification dimension
///
/// The declaration order is the order in which instructions are appended to a
/// prompt:
/// - IAB_categories: IAB content taxonomy v2
/// - Age_groups: Age affinity
/// - Gender: Gender affinity
/// - Income: Income bracket affinity
/// - Topics: Free-form general topics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Taxonomy {
    /// IAB content categories (version 2)
    IabCategories,

    /// Interested age groups
    AgeGroups,

    /// Interested gender
    Gender,

    /// Interested income groups
    Income,

    /// General topics
    Topics,
}

impl Taxonomy {
    /// All built-in taxonomies, in prompt order
    pub const ALL: [Taxonomy; 5] = [
        Taxonomy::IabCategories,
        Taxonomy::AgeGroups,
        Taxonomy::Gender,
        Taxonomy::Income,
        Taxonomy::Topics,
    ];

    /// Configuration key (and result key) for this taxonomy
    pub fn key(&self) -> &'static str {
        match self {
            Taxonomy::IabCategories => "IAB_categories",
            Taxonomy::AgeGroups => "Age_groups",
            Taxonomy::Gender => "Gender",
            Taxonomy::Income => "Income",
            Taxonomy::Topics => "Topics",
        }
    }

    /// Instruction sentence appended to the prompt when the taxonomy is enabled
    ///
    /// Texts are single-spaced sentences. Prompts that kept the runs of
    /// indentation from wrapped source lines will not match byte for byte.
    pub fn instruction(&self) -> &'static str {
        match self {
            Taxonomy::IabCategories => {
                "Classify the content into IAB categories version 2. Returns minimum 4 categories \
                 that are related to the content."
            }
            Taxonomy::AgeGroups => {
                "Also, choose age groups from the following groups: teen, young adults, middle aged, \
                 boomers, which would be interested in the above content. Returns at least 1 group."
            }
            Taxonomy::Gender => {
                "Also, choose gender from the following groups: Male, Female, Other, which would be \
                 interested in the above content. Returns at least 1 group."
            }
            Taxonomy::Income => {
                "Also, choose income groups from the following groups: Low income, Medium income, \
                 High income, which would be interested in the above content. Returns at least 1 group."
            }
            Taxonomy::Topics => "Also, return minimum 3 general topics that are related to the content.",
        }
    }

    /// Parse a taxonomy from its configuration key (case-sensitive)
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.key() == s)
    }
}

impl std::str::FromStr for Taxonomy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown taxonomy: {}", s))
    }
}

impl std::fmt::Display for Taxonomy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A taxonomy name paired with its prompt instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomySpec {
    /// Configuration key, also the key expected in the model output
    pub name: String,

    /// Sentence appended to the prompt when the taxonomy is enabled
    pub instruction: String,
}

impl TaxonomySpec {
    /// Create a new taxonomy spec
    pub fn new(name: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instruction: instruction.into(),
        }
    }
}

impl From<Taxonomy> for TaxonomySpec {
    fn from(taxonomy: Taxonomy) -> Self {
        Self::new(taxonomy.key(), taxonomy.instruction())
    }
}

/// Ordered table of taxonomy instructions
///
/// The built-in taxonomies always come first, in [`Taxonomy::ALL`] order.
/// Custom entries follow in the order they were added. Names are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyTable {
    entries: Vec<TaxonomySpec>,
}

impl TaxonomyTable {
    /// Table holding only the built-in taxonomies
    pub fn builtin() -> Self {
        Self {
            entries: Taxonomy::ALL.into_iter().map(TaxonomySpec::from).collect(),
        }
    }

    /// Built-in table extended with custom taxonomies
    ///
    /// Fails on an empty name or on a name that is already in the table.
    pub fn with_custom<I>(custom: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = TaxonomySpec>,
    {
        let mut table = Self::builtin();
        for spec in custom {
            table.push(spec)?;
        }
        Ok(table)
    }

    /// Append a custom taxonomy
    pub fn push(&mut self, spec: TaxonomySpec) -> Result<(), String> {
        if spec.name.trim().is_empty() {
            return Err("Taxonomy name cannot be empty".to_string());
        }
        if self.get(&spec.name).is_some() {
            return Err(format!("Duplicate taxonomy: {}", spec.name));
        }
        self.entries.push(spec);
        Ok(())
    }

    /// Look up a taxonomy by name
    pub fn get(&self, name: &str) -> Option<&TaxonomySpec> {
        self.entries.iter().find(|spec| spec.name == name)
    }

    /// Iterate over entries in prompt order
    pub fn iter(&self) -> impl Iterator<Item = &TaxonomySpec> {
        self.entries.iter()
    }

    /// Number of taxonomies in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty (never true for tables built from `builtin`)
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TaxonomyTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order() {
        let table = TaxonomyTable::builtin();
        let names: Vec<&str> = table.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["IAB_categories", "Age_groups", "Gender", "Income", "Topics"]);
    }

    #[test]
    fn test_parse_round_trip() {
        for taxonomy in Taxonomy::ALL {
            assert_eq!(Taxonomy::parse(taxonomy.key()), Some(taxonomy));
        }
        assert_eq!(Taxonomy::parse("gender"), None);
        assert!("Sentiment".parse::<Taxonomy>().is_err());
    }

    #[test]
    fn test_instruction_text() {
        assert_eq!(
            Taxonomy::IabCategories.instruction(),
            "Classify the content into IAB categories version 2. Returns minimum 4 categories that are related to the content."
        );
        assert_eq!(
            Taxonomy::Gender.instruction(),
            "Also, choose gender from the following groups: Male, Female, Other, which would be interested in the above content. Returns at least 1 group."
        );
        assert!(!Taxonomy::Income.instruction().contains("  "));
        assert!(!Taxonomy::AgeGroups.instruction().contains("  "));
    }

    #[test]
    fn test_custom_taxonomies_follow_builtins() {
        let table = TaxonomyTable::with_custom(vec![
            TaxonomySpec::new("Sentiment", "Also, return the overall sentiment."),
            TaxonomySpec::new("Language", "Also, return the content language."),
        ])
        .unwrap();

        assert_eq!(table.len(), 7);
        let names: Vec<&str> = table.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(&names[5..], &["Sentiment", "Language"]);
    }

    #[test]
    fn test_duplicate_taxonomy_rejected() {
        let result = TaxonomyTable::with_custom(vec![TaxonomySpec::new("Gender", "again")]);
        assert!(result.is_err());

        let result = TaxonomyTable::with_custom(vec![TaxonomySpec::new("  ", "blank")]);
        assert!(result.is_err());
    }
}
