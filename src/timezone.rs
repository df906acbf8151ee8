use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};

/// Resolves a timezone identifier from a file header into a UTC offset. Implement this
/// on top of a full timezone database when DST aware offsets are needed.
pub trait TimezoneProvider {
    /// The offset in effect at the given local time, None for an unknown identifier
    fn offset(&self, timezone: &str, local: &NaiveDateTime) -> Option<FixedOffset>;

    /// Attaches the timezone to a naive local timestamp
    fn localize(&self, timezone: &str, local: &NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        self.offset(timezone, local)?
            .from_local_datetime(local)
            .single()
    }
}

/// Lookup table of fixed offsets, without daylight saving rules
#[derive(Clone, Debug)]
pub struct FixedOffsetTable {
    offsets: HashMap<String, FixedOffset>,
}

impl FixedOffsetTable {
    pub fn empty() -> Self {
        FixedOffsetTable {
            offsets: HashMap::new(),
        }
    }

    pub fn insert(&mut self, timezone: impl Into<String>, offset: FixedOffset) {
        self.offsets.insert(timezone.into(), offset);
    }

    pub fn with_offset(mut self, timezone: impl Into<String>, offset: FixedOffset) -> Self {
        self.insert(timezone, offset);
        self
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

impl Default for FixedOffsetTable {
    /// Seeded with the common spellings of UTC
    fn default() -> Self {
        let utc = Utc.fix();
        ["UTC", "Etc/UTC", "GMT", "Z"]
            .iter()
            .fold(FixedOffsetTable::empty(), |table, name| {
                table.with_offset(*name, utc)
            })
    }
}

impl TimezoneProvider for FixedOffsetTable {
    fn offset(&self, timezone: &str, _: &NaiveDateTime) -> Option<FixedOffset> {
        self.offsets.get(timezone).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local(raw: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_default_table_knows_utc() {
        let table = FixedOffsetTable::default();
        let time = table.localize("UTC", &local("2016-03-01 10:00:00")).unwrap();

        assert_eq!(time.to_rfc3339(), "2016-03-01T10:00:00+00:00");
        assert!(table.localize("Europe/Amsterdam", &local("2016-03-01 10:00:00")).is_none());
    }

    #[test]
    fn test_custom_offset() {
        let table = FixedOffsetTable::default()
            .with_offset("Europe/Amsterdam", FixedOffset::east_opt(3600).unwrap());
        let time = table
            .localize("Europe/Amsterdam", &local("2016-03-01 10:00:00"))
            .unwrap();

        assert_eq!(time.to_rfc3339(), "2016-03-01T10:00:00+01:00");
        assert_eq!(time.naive_utc(), local("2016-03-01 09:00:00"));
    }
}
