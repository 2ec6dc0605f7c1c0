//! CSV-backed record store
//!
//! The backing file is read and written whole on every operation. There is
//! no locking and no temp-file rename: the file is assumed to belong to a
//! single running process.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::material::{MaterialRecord, CANONICAL_COLUMNS};
use crate::{Error, Result};

/// Ordered set of material records
///
/// Always carries the canonical column layout, even when empty. Columns the
/// file has beyond the canonical ones are kept in `extra_columns` (header
/// order) and written back after the canonical columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    records: Vec<MaterialRecord>,
    extra_columns: Vec<String>,
}

impl RecordSet {
    /// Record set with no rows
    pub fn empty() -> Self {
        Self::default()
    }

    /// Records with a preferred order for non-canonical columns
    ///
    /// Extra keys found on the records but missing from `extra_columns`
    /// are appended in first-seen order.
    pub fn with_extra_columns(records: Vec<MaterialRecord>, extra_columns: Vec<String>) -> Self {
        let mut set = Self {
            records: Vec::new(),
            extra_columns,
        };
        for record in records {
            set.push(record);
        }
        set
    }

    /// Header names in file order
    pub fn columns(&self) -> Vec<&str> {
        CANONICAL_COLUMNS
            .iter()
            .map(|c| c.key())
            .chain(self.extra_columns.iter().map(String::as_str))
            .collect()
    }

    /// Non-canonical header names in file order
    pub fn extra_columns(&self) -> &[String] {
        &self.extra_columns
    }

    pub fn records(&self) -> &[MaterialRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<MaterialRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn push(&mut self, record: MaterialRecord) {
        for key in record.extra.keys() {
            if !self.extra_columns.contains(key) {
                self.extra_columns.push(key.clone());
            }
        }
        self.records.push(record);
    }

    /// Drop rows equal to an earlier row, cell by cell
    ///
    /// Keeps the first occurrence and the order of everything else.
    /// Returns the number of removed rows.
    pub fn dedupe(&mut self) -> usize {
        let before = self.records.len();
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(before);
        for record in std::mem::take(&mut self.records) {
            if seen.insert(self.row_cells(&record)) {
                kept.push(record);
            }
        }
        self.records = kept;
        before - self.records.len()
    }

    /// Canonical cells followed by the extra column cells
    fn row_cells(&self, record: &MaterialRecord) -> Vec<String> {
        let mut cells = record.to_cells();
        cells.extend(self.extra_columns.iter().map(|h| record.extra_cell(h)));
        cells
    }

    /// Parse CSV text with a header row
    ///
    /// Columns are matched by header name. Every canonical column must be
    /// present; any other column is carried along as text.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::Reader::from_reader(reader);
        let headers = rdr.headers()?.clone();

        let mut canonical_idx = Vec::with_capacity(CANONICAL_COLUMNS.len());
        for column in CANONICAL_COLUMNS {
            let idx = headers
                .iter()
                .position(|h| h == column.key())
                .ok_or_else(|| Error::MissingColumn(column.to_string()))?;
            canonical_idx.push(idx);
        }

        // First occurrence wins for repeated header names
        let mut extra_idx: Vec<(usize, String)> = Vec::new();
        for (idx, header) in headers.iter().enumerate() {
            let canonical = CANONICAL_COLUMNS.iter().any(|c| c.key() == header);
            if !canonical && !extra_idx.iter().any(|(_, h)| h == header) {
                extra_idx.push((idx, header.to_string()));
            }
        }

        let canonical_headers: csv::StringRecord =
            CANONICAL_COLUMNS.iter().map(|c| c.key()).collect();

        let mut set = Self {
            records: Vec::new(),
            extra_columns: extra_idx.iter().map(|(_, h)| h.clone()).collect(),
        };
        for row in rdr.records() {
            let row = row?;
            let canonical_row: csv::StringRecord = canonical_idx
                .iter()
                .map(|&i| row.get(i).unwrap_or(""))
                .collect();
            let mut record: MaterialRecord = canonical_row.deserialize(Some(&canonical_headers))?;
            for (idx, header) in &extra_idx {
                record
                    .extra
                    .insert(header.clone(), row.get(*idx).unwrap_or("").to_string());
            }
            set.records.push(record);
        }

        Ok(set)
    }

    /// Write header and rows: canonical columns, then extra columns
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);

        wtr.write_record(self.columns())?;
        for record in &self.records {
            wtr.write_record(self.row_cells(record))?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Full CSV text, as written to disk and offered for download
    pub fn to_csv_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        String::from_utf8(buf).map_err(|e| Error::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }
}

impl From<Vec<MaterialRecord>> for RecordSet {
    fn from(records: Vec<MaterialRecord>) -> Self {
        Self::with_extra_columns(records, Vec::new())
    }
}

/// Result of an append, used to pick the user notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// File was absent or empty and now holds the new row
    Created,
    /// Row was merged into existing data
    Updated,
}

/// Read/append/overwrite access to one CSV file
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when the backing file exists and is non-empty
    pub fn has_data(&self) -> Result<bool> {
        match fs::metadata(&self.path) {
            Ok(meta) => Ok(meta.is_file() && meta.len() > 0),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Load all records
    ///
    /// An absent or zero-byte file is an empty record set, not an error.
    pub fn load(&self) -> Result<RecordSet> {
        if !self.has_data()? {
            debug!("No data at {}, returning empty record set", self.path.display());
            return Ok(RecordSet::empty());
        }

        let file = File::open(&self.path)?;
        let set = RecordSet::from_reader(file)?;
        debug!("Loaded {} records from {}", set.len(), self.path.display());
        Ok(set)
    }

    /// Append one record, dropping exact-duplicate rows
    pub fn append(&self, record: MaterialRecord) -> Result<AppendOutcome> {
        self.append_with(record, true)
    }

    /// Append one record, optionally dropping exact-duplicate rows
    pub fn append_with(&self, record: MaterialRecord, dedupe: bool) -> Result<AppendOutcome> {
        let existed = self.has_data()?;
        let mut set = if existed {
            self.load()?
        } else {
            RecordSet::empty()
        };

        set.push(record);
        if dedupe {
            let removed = set.dedupe();
            if removed > 0 {
                debug!("Dropped {} duplicate rows", removed);
            }
        }

        self.write(&set)?;

        let outcome = if existed {
            AppendOutcome::Updated
        } else {
            AppendOutcome::Created
        };
        info!(
            "Appended record to {} ({:?}, {} rows)",
            self.path.display(),
            outcome,
            set.len()
        );
        Ok(outcome)
    }

    /// Replace the file content with `records` as given
    ///
    /// No dedupe and no re-derivation of computed columns.
    pub fn overwrite(&self, records: &RecordSet) -> Result<()> {
        self.write(records)?;
        info!(
            "Overwrote {} with {} rows",
            self.path.display(),
            records.len()
        );
        Ok(())
    }

    fn write(&self, set: &RecordSet) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut writer = BufWriter::new(File::create(&self.path)?);
        set.write_csv(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
