//! Dwelling-unit records from the permit CSV.
//!
//! Column 0 holds the street address, column 2 the dwelling-unit count. The
//! count is carried through untouched; nothing here parses it as a number.

use std::collections::btree_map::{self, BTreeMap};

use csv::ReaderBuilder;
use tracing::{debug, warn};

use crate::address::CanonicalAddress;
use crate::error::{Error, Result};

const ADDRESS_COLUMN: usize = 0;
const DWELLING_UNITS_COLUMN: usize = 2;

/// Canonical address → dwelling-unit count, ordered by address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DwellingRecords {
    entries: BTreeMap<CanonicalAddress, String>,
}

impl DwellingRecords {
    /// Inserts or replaces the count for `address`.
    pub fn insert(&mut self, address: CanonicalAddress, dwelling_units: impl Into<String>) {
        self.entries.insert(address, dwelling_units.into());
    }

    /// Looks up the dwelling-unit count for an address.
    #[must_use]
    pub fn get(&self, address: &CanonicalAddress) -> Option<&str> {
        self.entries.get(address).map(String::as_str)
    }

    /// Returns `true` if `address` has a record.
    #[must_use]
    pub fn contains(&self, address: &CanonicalAddress) -> bool {
        self.entries.contains_key(address)
    }

    /// Number of distinct addresses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates records in ascending address order.
    pub fn iter(&self) -> btree_map::Iter<'_, CanonicalAddress, String> {
        self.entries.iter()
    }
}

impl FromIterator<(CanonicalAddress, String)> for DwellingRecords {
    fn from_iter<T: IntoIterator<Item = (CanonicalAddress, String)>>(iter: T) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

/// Reads dwelling records from CSV text.
///
/// The first row is a header and is skipped. Rows whose normalized address
/// is shorter than [`crate::address::MIN_ADDRESS_LEN`] are dropped, as are
/// rows with no dwelling-unit column. A later row for the same address
/// replaces an earlier one.
///
/// Quoting is lenient: an unterminated quote swallows the rest of the input
/// into one field rather than failing. `source_name` only labels error
/// messages.
///
/// # Errors
///
/// Returns [`Error::Parse`] only if the CSV reader reports an error.
pub fn extract(csv_text: &str, source_name: &str) -> Result<DwellingRecords> {
    let mut reader =
        ReaderBuilder::new().has_headers(true).flexible(true).from_reader(csv_text.as_bytes());

    let mut records = DwellingRecords::default();
    for row in reader.records() {
        let row = row.map_err(|e| Error::parse(source_name, e))?;
        let line = row.position().map(csv::Position::line);
        let Some(raw_address) = row.get(ADDRESS_COLUMN) else {
            continue;
        };

        let address = CanonicalAddress::from_raw(raw_address);
        if !address.is_usable() {
            debug!(line, raw = raw_address, "skipping row with unusable address");
            continue;
        }

        let Some(dwelling_units) = row.get(DWELLING_UNITS_COLUMN) else {
            warn!(
                line,
                columns = row.len(),
                %address,
                "skipping row without a dwelling-unit column"
            );
            continue;
        };

        records.insert(address, dwelling_units);
    }

    Ok(records)
}
