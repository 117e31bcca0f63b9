use std::sync::OnceLock;

use anyhow::{Context, Result};

use crate::types::FrostRecord;

/// Frost-normals dataset compiled into the binary.
const BUILTIN_JSON: &str = include_str!("../data/frost_records.json");

/// Immutable ordered sequence of frost records.
///
/// Lookups are a linear scan for the first record whose `zipcode` equals the
/// key. The dataset is read-only for the life of the process.
#[derive(Debug, Clone)]
pub struct FrostDataset {
    records: Vec<FrostRecord>,
}

impl FrostDataset {
    pub fn new(records: Vec<FrostRecord>) -> Self {
        Self { records }
    }

    /// Parse a dataset from a JSON array of records
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<FrostRecord> =
            serde_json::from_str(json).context("Failed to parse frost records JSON")?;
        Ok(Self::new(records))
    }

    /// The dataset embedded at compile time
    pub fn builtin() -> &'static FrostDataset {
        static BUILTIN: OnceLock<FrostDataset> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            FrostDataset::from_json(BUILTIN_JSON).expect("embedded frost dataset is valid JSON")
        })
    }

    /// First record whose `zipcode` equals `zip` (exact, case-sensitive).
    /// Any string is accepted as a key; a string that matches nothing simply
    /// returns `None`.
    pub fn lookup(&self, zip: &str) -> Option<&FrostRecord> {
        self.records.iter().find(|r| r.zipcode == zip)
    }

    pub fn records(&self) -> &[FrostRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FreezeDate;

    #[test]
    fn test_builtin_parses() {
        let dataset = FrostDataset::builtin();
        assert!(!dataset.is_empty());
    }

    #[test]
    fn test_lookup_known_zip() {
        let record = FrostDataset::builtin().lookup("00601").unwrap();
        assert_eq!(record.state_province, "PR");
        assert_eq!(record.country, "RQ");
        assert_eq!(record.station_name, "ADJUNTAS SUBSTN");
        assert_eq!(record.station_altitude, 1830);
        assert_eq!(record.station_distance_miles, 2.6);
        assert_eq!(record.last_freeze, "infrequent frost");
        assert_eq!(record.first_freeze, "infrequent frost");
        assert_eq!(record.growing_days, 365);
    }

    #[test]
    fn test_lookup_unknown_zip() {
        assert!(FrostDataset::builtin().lookup("99999").is_none());
        // No validation: empty and non-ZIP strings just fail to match
        assert!(FrostDataset::builtin().lookup("").is_none());
        assert!(FrostDataset::builtin().lookup("not a zip").is_none());
    }

    #[test]
    fn test_lookup_first_match_wins() {
        let mut records = FrostDataset::builtin().records().to_vec();
        let mut dup = records[0].clone();
        dup.station_name = "SECOND STATION".to_string();
        let zip = dup.zipcode.clone();
        records.push(dup);

        let dataset = FrostDataset::new(records);
        let found = dataset.lookup(&zip).unwrap();
        assert_ne!(found.station_name, "SECOND STATION");
    }

    #[test]
    fn test_sentinels_match_growing_days() {
        // Every sentinel record in the embedded data carries the growing-day
        // count the sentinel implies
        for record in FrostDataset::builtin().records() {
            if let Some(days) = record.last_freeze_date().implied_growing_days() {
                assert_eq!(record.growing_days, days, "zip {}", record.zipcode);
            }
            if record.last_freeze_date() == FreezeDate::YearRoundRisk {
                assert_eq!(record.first_freeze_date(), FreezeDate::YearRoundRisk);
            }
        }
    }
}
