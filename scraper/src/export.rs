//! Flattening records into a table, and writing that table out.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use common::{columns, JobRecord};
use tracing::info;

use crate::error::Result;

/// Records flattened into header + rows. Empty fields are empty cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Columns are the union of what each record carries, in the order
    /// they are first seen. The core columns are always there, even with
    /// no records; `applicants` only shows up once some record actually
    /// has a value for it.
    pub fn from_records(records: &[JobRecord]) -> Self {
        let mut headers: Vec<&'static str> = match records.first() {
            Some(first) => first.present_columns().collect(),
            None => columns::CORE.to_vec(),
        };
        for record in records {
            for column in record.present_columns() {
                if !headers.contains(&column) {
                    headers.push(column);
                }
            }
        }

        let rows = records
            .iter()
            .map(|record| {
                headers
                    .iter()
                    .map(|column| record.get(column).unwrap_or_default().to_string())
                    .collect()
            })
            .collect();

        Self {
            headers: headers.into_iter().map(String::from).collect(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Writes the table as CSV (header row first) to any writer.
pub fn write_csv_to<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&table.headers)?;
    for row in &table.rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the records to a UTF-8 CSV file, creating parent directories.
pub fn write_csv(records: &[JobRecord], path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let table = Table::from_records(records);
    write_csv_to(&table, File::create(path)?)?;

    info!(rows = table.rows.len(), path = %path.display(), "wrote CSV");
    Ok(())
}

/// Writes the records as a pretty-printed JSON array.
pub fn write_json(records: &[JobRecord], path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let json_output = serde_json::to_string_pretty(records)?;
    fs::write(path, json_output)?;

    info!(records = records.len(), path = %path.display(), "wrote JSON");
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
            fs::create_dir_all(dir)?;
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full(id: &str) -> JobRecord {
        JobRecord {
            job_id: id.to_string(),
            company_name: Some("Acme".to_string()),
            role: Some("Engineer, Platform".to_string()),
            applicants: Some("12".to_string()),
            job_url: Some(format!("https://example.com/{id}")),
        }
    }

    fn csv_string(table: &Table) -> String {
        let mut buf = Vec::new();
        write_csv_to(table, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_header_without_applicants() {
        let table = Table::from_records(&[JobRecord::new("1"), JobRecord::new("2")]);
        assert_eq!(table.headers, vec!["job_id", "company_name", "role", "job_url"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], vec!["1", "", "", ""]);
    }

    #[test]
    fn test_applicants_first_seen_in_first_record() {
        let table = Table::from_records(&[full("1"), JobRecord::new("2")]);
        assert_eq!(
            table.headers,
            vec!["job_id", "company_name", "role", "applicants", "job_url"]
        );
        assert_eq!(table.rows[1], vec!["2", "", "", "", ""]);
    }

    #[test]
    fn test_applicants_seen_late_goes_last() {
        let table = Table::from_records(&[JobRecord::new("1"), full("2")]);
        assert_eq!(
            table.headers,
            vec!["job_id", "company_name", "role", "job_url", "applicants"]
        );
        assert_eq!(table.rows[1][4], "12");
        assert_eq!(table.rows[0][4], "");
    }

    #[test]
    fn test_no_records() {
        let table = Table::from_records(&[]);
        assert!(table.is_empty());
        assert_eq!(csv_string(&table), "job_id,company_name,role,job_url\n");
    }

    #[test]
    fn test_empty_run_still_writes_header_file() {
        let mut dir = std::env::temp_dir();
        dir.push("job_scraper_export_empty");
        let _ = fs::remove_dir_all(&dir);
        let path = dir.join("output.csv");

        write_csv(&[], &path).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "job_id,company_name,role,job_url\n"
        );
    }

    #[test]
    fn test_csv_quotes_only_when_needed() {
        let out = csv_string(&Table::from_records(&[full("9")]));
        assert_eq!(
            out,
            "job_id,company_name,role,applicants,job_url\n\
             9,Acme,\"Engineer, Platform\",12,https://example.com/9\n"
        );
    }
}
