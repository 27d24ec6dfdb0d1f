//! CSV transaction loading.
//!
//! Rows are `id, subscriber, revenue, MM/DD/YYYY date` with no header
//! requirement: any record without a `/` in one of its fields is treated as a
//! header or comment and passed over. Records are read as raw bytes, so only
//! the fields of data rows are ever decoded as UTF-8.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder, Trim};
use report_core::error::{ReportError, Result, RowField};
use report_core::models::Transaction;
use report_core::settings::ErrorPolicy;
use report_core::time_utils::parse_date;
use tracing::{debug, warn};

const SUBSCRIBER_COLUMN: usize = 1;
const REVENUE_COLUMN: usize = 2;
const DATE_COLUMN: usize = 3;

/// Counters describing one pass over an input file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadStats {
    /// Data rows turned into transactions.
    pub transactions: usize,
    /// Records without a `/`, such as headers.
    pub ignored: usize,
    /// Malformed data rows dropped under [`ErrorPolicy::Skip`].
    pub skipped: usize,
}

// ── TransactionReader ─────────────────────────────────────────────────────────

/// Streams [`Transaction`]s out of a CSV source in file order.
///
/// Under [`ErrorPolicy::Abort`] a malformed row is yielded as an error; under
/// [`ErrorPolicy::Skip`] it is logged and counted instead.
pub struct TransactionReader<R: Read> {
    csv: csv::Reader<R>,
    record: ByteRecord,
    policy: ErrorPolicy,
    stats: ReadStats,
}

impl TransactionReader<File> {
    /// Open `path` for reading. A missing or unreadable file is fatal.
    pub fn open(path: &Path, policy: ErrorPolicy) -> Result<Self> {
        let file = File::open(path).map_err(|source| ReportError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Reading transactions from {}", path.display());
        Ok(Self::from_reader(file, policy))
    }
}

impl<R: Read> TransactionReader<R> {
    pub fn from_reader(reader: R, policy: ErrorPolicy) -> Self {
        let csv = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);
        Self {
            csv,
            record: ByteRecord::new(),
            policy,
            stats: ReadStats::default(),
        }
    }

    pub fn stats(&self) -> ReadStats {
        self.stats
    }
}

impl<R: Read> Iterator for TransactionReader<R> {
    type Item = Result<Transaction>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.csv.read_byte_record(&mut self.record) {
                Ok(false) => return None,
                Err(e) => return Some(Err(e.into())),
                Ok(true) => {}
            }

            if !is_data_record(&self.record) {
                self.stats.ignored += 1;
                continue;
            }

            let line = self.record.position().map(|p| p.line()).unwrap_or(0);
            match parse_record(&self.record, line) {
                Ok(tx) => {
                    self.stats.transactions += 1;
                    return Some(Ok(tx));
                }
                Err(e) if self.policy == ErrorPolicy::Skip => {
                    warn!("Skipping row: {}", e);
                    self.stats.skipped += 1;
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

// ── Public helpers ────────────────────────────────────────────────────────────

/// Read every transaction in `path` into memory.
pub fn read_transactions(path: &Path, policy: ErrorPolicy) -> Result<(Vec<Transaction>, ReadStats)> {
    let mut reader = TransactionReader::open(path, policy)?;
    let transactions = reader.by_ref().collect::<Result<Vec<_>>>()?;
    Ok((transactions, reader.stats()))
}

/// A record counts as data when any field contains a `/`.
pub fn is_data_record(record: &ByteRecord) -> bool {
    record.iter().any(|field| field.contains(&b'/'))
}

/// Convert one data record into a [`Transaction`].
///
/// `line` is only used to label errors.
pub fn parse_record(record: &ByteRecord, line: u64) -> Result<Transaction> {
    let subscriber_id = field_text(record, SUBSCRIBER_COLUMN, RowField::SubscriberId, line)?;
    let revenue = field_text(record, REVENUE_COLUMN, RowField::Revenue, line)?;
    let date = field_text(record, DATE_COLUMN, RowField::Date, line)?;

    let amount = revenue
        .parse::<i64>()
        .map_err(|_| malformed(line, RowField::Revenue, revenue))?;
    let date = parse_date(date).map_err(|_| malformed(line, RowField::Date, date))?;

    Ok(Transaction::new(subscriber_id, amount, date))
}

fn field_text(record: &ByteRecord, column: usize, field: RowField, line: u64) -> Result<&str> {
    let raw = record
        .get(column)
        .ok_or_else(|| malformed(line, field, ""))?;
    std::str::from_utf8(raw).map_err(|_| malformed(line, field, &String::from_utf8_lossy(raw)))
}

fn malformed(line: u64, field: RowField, value: &str) -> ReportError {
    ReportError::MalformedRow {
        line,
        field,
        value: value.to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn read_bytes(input: &[u8], policy: ErrorPolicy) -> (Vec<Result<Transaction>>, ReadStats) {
        let mut reader = TransactionReader::from_reader(input, policy);
        let items: Vec<_> = reader.by_ref().collect();
        (items, reader.stats())
    }

    fn read_str(input: &str, policy: ErrorPolicy) -> (Vec<Result<Transaction>>, ReadStats) {
        read_bytes(input.as_bytes(), policy)
    }

    // ── row filtering ─────────────────────────────────────────────────────────

    #[test]
    fn test_header_and_blank_lines_ignored() {
        let input = "id,subscription_id,amount,transaction_date\n\n1,S1,100,01/01/2010\n";
        let (items, stats) = read_str(input, ErrorPolicy::Abort);

        assert_eq!(items.len(), 1);
        let tx = items[0].as_ref().unwrap();
        assert_eq!(tx, &Transaction::new("S1", 100, date(2010, 1, 1)));
        assert_eq!(stats.ignored, 1);
        assert_eq!(stats.transactions, 1);
    }

    #[test]
    fn test_non_utf8_header_ignored() {
        let input = b"caf\xe9 header line\n1,S1,100,01/01/2010\n";
        for policy in [ErrorPolicy::Abort, ErrorPolicy::Skip] {
            let (items, stats) = read_bytes(input, policy);
            assert_eq!(items.len(), 1);
            assert_eq!(items[0].as_ref().unwrap(), &Transaction::new("S1", 100, date(2010, 1, 1)));
            assert_eq!(stats.ignored, 1);
        }
    }

    #[test]
    fn test_fields_are_trimmed() {
        let input = "7, S9 , 250 , 12/31/2013\r\n";
        let (items, _) = read_str(input, ErrorPolicy::Abort);
        assert_eq!(
            items[0].as_ref().unwrap(),
            &Transaction::new("S9", 250, date(2013, 12, 31))
        );
    }

    #[test]
    fn test_extra_columns_allowed() {
        let input = "1,S1,-40,02/02/2012,refund,note\n";
        let (items, _) = read_str(input, ErrorPolicy::Abort);
        assert_eq!(items[0].as_ref().unwrap().amount, -40);
    }

    #[test]
    fn test_file_order_preserved() {
        let input = "1,A,1,03/01/2011\n2,B,2,01/01/2010\n3,A,3,02/01/2011\n";
        let (items, _) = read_str(input, ErrorPolicy::Abort);
        let ids: Vec<i64> = items.iter().map(|r| r.as_ref().unwrap().amount).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    // ── malformed rows ────────────────────────────────────────────────────────

    #[test]
    fn test_bad_revenue_aborts_with_line() {
        let input = "header\n1,S1,12.50,01/01/2010\n";
        let (items, _) = read_str(input, ErrorPolicy::Abort);
        match &items[0] {
            Err(ReportError::MalformedRow { line, field, value }) => {
                assert_eq!(*line, 2);
                assert_eq!(*field, RowField::Revenue);
                assert_eq!(value, "12.50");
            }
            other => panic!("expected malformed row, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_date_aborts() {
        let input = "1,S1,10,2010/01/01\n";
        let (items, _) = read_str(input, ErrorPolicy::Abort);
        assert!(matches!(
            items[0],
            Err(ReportError::MalformedRow { field: RowField::Date, .. })
        ));
    }

    #[test]
    fn test_short_row_reports_missing_field() {
        let input = "1,S1,01/01/2010\n";
        let (items, _) = read_str(input, ErrorPolicy::Abort);
        assert!(matches!(
            items[0],
            Err(ReportError::MalformedRow { field: RowField::Date, .. })
        ));
    }

    #[test]
    fn test_skip_policy_continues_past_bad_rows() {
        let input = "1,S1,abc,01/01/2010\n2,S2,5,01/02/2010\n3,S3,5,99/99/2010\n";
        let (items, stats) = read_str(input, ErrorPolicy::Skip);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].as_ref().unwrap().subscriber_id, "S2");
        assert_eq!(stats.skipped, 2);
        assert_eq!(stats.transactions, 1);
    }

    #[test]
    fn test_non_utf8_data_row_follows_policy() {
        let input = b"1,S\xff,5,01/01/2010\n2,S2,7,01/02/2010\n";

        let (items, _) = read_bytes(input, ErrorPolicy::Abort);
        assert!(matches!(
            items[0],
            Err(ReportError::MalformedRow { line: 1, field: RowField::SubscriberId, .. })
        ));

        let (items, stats) = read_bytes(input, ErrorPolicy::Skip);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].as_ref().unwrap().subscriber_id, "S2");
        assert_eq!(stats.skipped, 1);
    }

    // ── read_transactions ─────────────────────────────────────────────────────

    #[test]
    fn test_read_transactions_from_file() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "id,sub,amount,date").unwrap();
        writeln!(file, "1,S1,100,01/01/2010").unwrap();
        writeln!(file, "2,S1,50,01/10/2010").unwrap();
        file.flush().unwrap();

        let (txs, stats) = read_transactions(file.path(), ErrorPolicy::Abort).unwrap();
        assert_eq!(txs.len(), 2);
        assert_eq!(stats, ReadStats { transactions: 2, ignored: 1, skipped: 0 });
    }

    #[test]
    fn test_read_transactions_stops_on_abort() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "1,S1,oops,01/01/2010").unwrap();
        writeln!(file, "2,S1,50,01/10/2010").unwrap();
        file.flush().unwrap();

        let err = read_transactions(file.path(), ErrorPolicy::Abort).unwrap_err();
        assert!(matches!(err, ReportError::MalformedRow { line: 1, .. }));
    }

    #[test]
    fn test_missing_file_is_file_read_error() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = dir.path().join("absent.csv");
        let err = read_transactions(&path, ErrorPolicy::Skip).unwrap_err();
        assert!(matches!(err, ReportError::FileRead { .. }));
    }
}
