//! Equality filters and the one place they are written into a statement.

/// A filter key that is not a plain column identifier.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("invalid filter field '{0}'")]
pub struct InvalidField(pub String);

/// Column equality predicates applied as `AND field = 'value'`.
///
/// Field names are checked on insertion; values are passed through verbatim.
/// Inserting a field that is already present replaces its value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterSet {
    entries: Vec<(String, String)>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, value: &str) -> Result<(), InvalidField> {
        let field = field.trim();
        if !is_identifier(field) {
            return Err(InvalidField(field.to_string()));
        }
        match self.entries.iter_mut().find(|(k, _)| k == field) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((field.to_string(), value.to_string())),
        }
        Ok(())
    }

    pub fn with_filter(mut self, field: &str, value: &str) -> Result<Self, InvalidField> {
        self.insert(field, value)?;
        Ok(self)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == field)
            .map(|(_, v)| v.as_str())
    }

    /// Removes `field`, returning its value if it was set.
    pub fn remove(&mut self, field: &str) -> Option<String> {
        let idx = self.entries.iter().position(|(k, _)| k == field)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> TryFrom<&[(&'a str, &'a str)]> for FilterSet {
    type Error = InvalidField;

    fn try_from(pairs: &[(&'a str, &'a str)]) -> Result<Self, Self::Error> {
        let mut filters = FilterSet::new();
        for (field, value) in pairs {
            filters.insert(field, value)?;
        }
        Ok(filters)
    }
}

/// Column names may be qualified (`kvk.plaats`) but carry nothing else.
fn is_identifier(field: &str) -> bool {
    !field.is_empty()
        && !field.starts_with('.')
        && !field.ends_with('.')
        && field
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// Appends the active-only predicate and every filter to `base`.
///
/// Values are not escaped. Callers are trusted to pass literal text.
pub fn build_query(base: &str, filters: &FilterSet, active_only: bool) -> String {
    let mut query = base.to_string();
    if active_only {
        query.push_str(" AND isnull(status)");
    }
    for (field, value) in filters.iter() {
        query.push_str(&format!(" AND {} = '{}'", field, value));
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "SELECT * FROM kvk WHERE plaats ILIKE '%Delft%'";

    #[test]
    fn no_filters_inactive() {
        assert_eq!(build_query(BASE, &FilterSet::new(), false), BASE);
    }

    #[test]
    fn active_only_comes_first() {
        let filters = FilterSet::new()
            .with_filter("rechtsvorm", "Besloten Vennootschap")
            .unwrap();
        assert_eq!(
            build_query(BASE, &filters, true),
            format!(
                "{} AND isnull(status) AND rechtsvorm = 'Besloten Vennootschap'",
                BASE
            )
        );
    }

    #[test]
    fn filters_keep_insertion_order() {
        let filters = FilterSet::try_from(&[("plaats", "Rotterdam"), ("type", "Hoofdvestiging")][..])
            .unwrap();
        assert_eq!(
            build_query("q", &filters, false),
            "q AND plaats = 'Rotterdam' AND type = 'Hoofdvestiging'"
        );
    }

    #[test]
    fn reinsert_replaces_value() {
        let mut filters = FilterSet::new();
        filters.insert("plaats", "Delft").unwrap();
        filters.insert("plaats", "Leiden").unwrap();
        assert_eq!(filters.len(), 1);
        assert_eq!(filters.get("plaats"), Some("Leiden"));
    }

    #[test]
    fn remove_returns_value() {
        let mut filters = FilterSet::new().with_filter("kvk", "27312152").unwrap();
        assert_eq!(filters.remove("kvk").as_deref(), Some("27312152"));
        assert!(filters.is_empty());
        assert_eq!(filters.remove("kvk"), None);
    }

    #[test]
    fn rejects_non_identifier_fields() {
        assert!(FilterSet::new().with_filter("kvk.plaats", "x").is_ok());
        assert_eq!(
            FilterSet::new().with_filter("plaats = 'x' OR 1", "y"),
            Err(InvalidField("plaats = 'x' OR 1".to_string()))
        );
        assert!(FilterSet::new().with_filter("", "y").is_err());
        assert!(FilterSet::new().with_filter(".plaats", "y").is_err());
    }
}
