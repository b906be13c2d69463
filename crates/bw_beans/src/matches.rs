/// Largest edit distance at which a name still counts as a typo.
pub const MAX_DISTANCE: usize = 1;

/// Shortest known name that matches by being contained in the query.
pub const MIN_CONTAINED_LEN: usize = 3;

/// "Did you mean" candidates for an unknown property name.
///
/// Comparison ignores ASCII and Unicode case. A known name qualifies when its
/// Levenshtein distance to the query is at most [`MAX_DISTANCE`], or when the
/// query contains it and it has at least [`MIN_CONTAINED_LEN`] characters.
/// Matches are ordered by distance, then by name.
///
/// ```
/// use bw_beans::PropertyMatches;
///
/// let known = ["name", "myString", "myStrings", "myStriNg", "myStringss"];
///
/// let matches = PropertyMatches::for_property("mystring", known);
/// assert_eq!(matches.possible_matches(), ["myStriNg", "myString", "myStrings"]);
///
/// let matches = PropertyMatches::for_property("names", known);
/// assert_eq!(matches.possible_matches(), ["name"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMatches {
    property: String,
    possible_matches: Vec<String>,
}

impl PropertyMatches {
    pub fn for_property<'a>(property: &str, known: impl IntoIterator<Item = &'a str>) -> Self {
        let query = property.to_lowercase();

        let mut scored: Vec<(usize, &str)> = known
            .into_iter()
            .filter_map(|name| {
                let candidate = name.to_lowercase();
                let distance = strsim::levenshtein(&query, &candidate);
                let contained =
                    candidate.chars().count() >= MIN_CONTAINED_LEN && query.contains(&candidate);
                (distance <= MAX_DISTANCE || contained).then_some((distance, name))
            })
            .collect();
        scored.sort_unstable();
        scored.dedup_by(|a, b| a.1 == b.1);

        Self {
            property: property.to_owned(),
            possible_matches: scored.into_iter().map(|(_, name)| name.to_owned()).collect(),
        }
    }

    /// The name that was looked up.
    #[inline]
    pub fn property(&self) -> &str {
        &self.property
    }

    #[inline]
    pub fn possible_matches(&self) -> &[String] {
        &self.possible_matches
    }

    #[inline]
    pub fn into_matches(self) -> Vec<String> {
        self.possible_matches
    }
}

#[cfg(test)]
mod tests {
    use super::PropertyMatches;

    fn matches(property: &str, known: &[&str]) -> Vec<String> {
        PropertyMatches::for_property(property, known.iter().copied()).into_matches()
    }

    #[test]
    fn single_typo() {
        assert_eq!(matches("ag", &["age", "name", "spouse"]), ["age"]);
        assert_eq!(matches("Age", &["age"]), ["age"]);
    }

    #[test]
    fn threshold_excludes_distance_two() {
        let found = matches("mystring", &["myString", "myStrings", "myStriNg", "myStringss"]);
        assert_eq!(found.len(), 3);
        assert!(!found.iter().any(|name| name == "myStringss"));
    }

    #[test]
    fn containment_needs_three_chars() {
        assert_eq!(matches("spouseName", &["spouse", "na"]), ["spouse"]);
        assert!(matches("xyz", &["abc"]).is_empty());
    }

    #[test]
    fn query_must_contain_the_candidate() {
        assert!(matches("str", &["myString"]).is_empty());
        assert_eq!(matches("myStringValue", &["myString"]), ["myString"]);
    }

    #[test]
    fn deduplicates() {
        assert_eq!(matches("nam", &["name", "name"]), ["name"]);
    }
}
