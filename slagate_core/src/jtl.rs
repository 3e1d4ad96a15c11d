use crate::error::{GateError, Result};
use crate::sample::{parse_bool_like, parse_i64_or_zero, parse_u64_or_zero, Sample};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Column names as written by JMeter's CSV result writer.
const COL_SUCCESS: &str = "success";
const COL_ELAPSED: &str = "elapsed";
const COL_TIMESTAMP: &str = "timeStamp";
const COL_RESPONSE_CODE: &str = "responseCode";

/// Resolved header positions for the columns we consume. Any column may be
/// absent, in which case every row takes that field's default.
struct Columns {
    success: Option<usize>,
    elapsed: Option<usize>,
    timestamp: Option<usize>,
    response_code: Option<usize>,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Self {
        let position = |name: &str| headers.iter().position(|h| h == name);
        Self {
            success: position(COL_SUCCESS),
            elapsed: position(COL_ELAPSED),
            timestamp: position(COL_TIMESTAMP),
            response_code: position(COL_RESPONSE_CODE),
        }
    }
}

/// Read all samples from a result file on disk.
///
/// A missing file is `GateError::SourceNotFound`; any other I/O or CSV-level
/// failure propagates as-is. Malformed field values never abort the read.
pub fn read_samples(path: impl AsRef<Path>) -> Result<Vec<Sample>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            GateError::SourceNotFound(path.to_path_buf())
        } else {
            GateError::IoError(e)
        }
    })?;
    parse_samples(file)
}

/// Parse samples from any reader producing the delimited log format: one
/// header row, one row per sample. Unknown columns are ignored, missing
/// columns and malformed values fall back to defaults.
pub fn parse_samples(input: impl Read) -> Result<Vec<Sample>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let columns = Columns::resolve(&headers);

    let mut samples = Vec::new();
    for record in reader.records() {
        let record = record?;
        let field = |idx: Option<usize>| idx.and_then(|i| record.get(i)).unwrap_or("");

        samples.push(Sample {
            success: parse_bool_like(field(columns.success)),
            elapsed_ms: parse_u64_or_zero(field(columns.elapsed)),
            timestamp_ms: parse_i64_or_zero(field(columns.timestamp)),
            response_code: field(columns.response_code).to_string(),
        });
    }

    debug!(samples = samples.len(), "parsed result log");
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_standard_rows() {
        let log = "timeStamp,elapsed,label,responseCode,success\n\
                   1000,120,home,200,true\n\
                   1100,80,home,404,false\n";
        let samples = parse_samples(log.as_bytes()).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].timestamp_ms, 1000);
        assert_eq!(samples[0].elapsed_ms, 120);
        assert!(samples[0].success);
        assert_eq!(samples[1].response_code, "404");
        assert!(!samples[1].success);
    }

    #[test]
    fn extra_columns_are_ignored() {
        let log = "timeStamp,elapsed,label,responseCode,success,bytes,grpThreads\n\
                   1000,50,api,200,true,512,10\n";
        let samples = parse_samples(log.as_bytes()).unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].elapsed_ms, 50);
    }

    #[test]
    fn missing_columns_take_defaults() {
        let log = "label,elapsed\nhome,75\n";
        let samples = parse_samples(log.as_bytes()).unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].elapsed_ms, 75);
        assert_eq!(samples[0].timestamp_ms, 0);
        assert!(!samples[0].success);
        assert_eq!(samples[0].response_code, "");
    }

    #[test]
    fn malformed_numerics_coerce_to_zero() {
        let log = "timeStamp,elapsed,responseCode,success\n\
                   not-a-number,also-bad,200,true\n";
        let samples = parse_samples(log.as_bytes()).unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].timestamp_ms, 0);
        assert_eq!(samples[0].elapsed_ms, 0);
        assert!(samples[0].success);
    }

    #[test]
    fn short_rows_are_tolerated() {
        let log = "timeStamp,elapsed,responseCode,success\n1000,20\n";
        let samples = parse_samples(log.as_bytes()).unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].response_code, "");
        assert!(!samples[0].success);
    }

    #[test]
    fn header_only_log_yields_no_samples() {
        let log = "timeStamp,elapsed,responseCode,success\n";
        let samples = parse_samples(log.as_bytes()).unwrap();
        assert!(samples.is_empty());
    }

    #[test]
    fn missing_file_is_source_not_found() {
        let err = read_samples("/nonexistent/results.jtl").unwrap_err();
        assert!(matches!(err, GateError::SourceNotFound(_)));
    }
}
