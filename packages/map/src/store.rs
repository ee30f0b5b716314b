//! The in-memory feature store.

use accident_map_accident_models::AccidentRecord;

/// Ordered in-memory collection of accident records.
///
/// Bulk-loaded once at startup and appended to by report intake; records
/// are never edited or removed for the lifetime of the session, so store
/// order doubles as stacking order (later records render on top).
#[derive(Debug, Default)]
pub struct FeatureStore {
    records: Vec<AccidentRecord>,
}

impl FeatureStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Creates a store from bulk-loaded records, preserving file order.
    #[must_use]
    pub fn from_records(records: Vec<AccidentRecord>) -> Self {
        Self { records }
    }

    /// Appends a record. Appended records stack on top of earlier ones.
    pub fn append(&mut self, record: AccidentRecord) {
        self.records.push(record);
    }

    /// Number of records in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at `index` in store order.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&AccidentRecord> {
        self.records.get(index)
    }

    /// Iterates records in store order (oldest first).
    pub fn iter(&self) -> std::slice::Iter<'_, AccidentRecord> {
        self.records.iter()
    }

    /// Whether any record already carries the given report ID.
    #[must_use]
    pub fn contains_report_id(&self, report_id: &str) -> bool {
        self.records
            .iter()
            .any(|record| record.report_id.as_deref() == Some(report_id))
    }
}

impl<'a> IntoIterator for &'a FeatureStore {
    type Item = &'a AccidentRecord;
    type IntoIter = std::slice::Iter<'a, AccidentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(report_id: Option<&str>) -> AccidentRecord {
        AccidentRecord {
            report_id: report_id.map(str::to_string),
            position: [0.0, 0.0],
            accident_type: "Collision".to_string(),
            severity: "Minor".to_string(),
            num_vehicles: "1".to_string(),
            num_casualties: "0".to_string(),
            description: None,
            timestamp: None,
        }
    }

    #[test]
    fn append_preserves_order() {
        let mut store = FeatureStore::new();
        store.append(record(Some("KLA-2025-ACC-001")));
        store.append(record(Some("KLA-2025-ACC-002")));

        assert_eq!(store.len(), 2);
        assert_eq!(
            store.get(1).unwrap().report_id.as_deref(),
            Some("KLA-2025-ACC-002")
        );
    }

    #[test]
    fn detects_existing_report_ids() {
        let store = FeatureStore::from_records(vec![record(Some("KLA-2025-ACC-042")), record(None)]);

        assert!(store.contains_report_id("KLA-2025-ACC-042"));
        assert!(!store.contains_report_id("KLA-2025-ACC-043"));
    }
}
