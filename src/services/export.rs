//! CSV export of table contents

use crate::config::Config;
use crate::model::TableEngine;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write the column labels and every row in sorted order, across all pages.
///
/// Cells are written as their formatted text. Returns the number of rows.
pub fn export_csv<W: Write>(engine: &TableEngine, writer: W) -> Result<usize> {
    let mut writer = csv::Writer::from_writer(writer);
    let columns = engine.columns();

    writer
        .write_record(columns.iter().map(|c| c.label.as_str()))
        .context("writing CSV header")?;

    let mut count = 0;
    for row in engine.sorted_rows() {
        let record: Vec<String> = columns.iter().map(|c| c.render(row).text).collect();
        writer
            .write_record(&record)
            .with_context(|| format!("writing CSV row {}", row.id))?;
        count += 1;
    }

    writer.flush().context("flushing CSV output")?;
    Ok(count)
}

/// File name for an export taken at `now`
pub fn export_file_name(now: DateTime<Local>) -> String {
    format!("export-{}.csv", now.format("%Y%m%d-%H%M%S"))
}

/// Export into `dir`, creating it if needed, and return the written path
pub fn export_to_dir(engine: &TableEngine, dir: &Path, now: DateTime<Local>) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let path = dir.join(export_file_name(now));
    let file =
        fs::File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let count = export_csv(engine, file)?;

    log::info!("exported {} rows to {}", count, path.display());
    Ok(path)
}

/// Export into the config directory with the current local time
pub fn export_table(engine: &TableEngine) -> Result<PathBuf> {
    let dir = Config::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    export_to_dir(engine, &dir, Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::table::{Column, Row};
    use crate::model::{domain, TableOptions};
    use chrono::TimeZone;
    use std::rc::Rc;

    fn engine() -> TableEngine {
        let rows: Rc<[Row]> = vec![
            Row::new("a").with("name", "Zed").with("amount", 1500.0),
            Row::new("b").with("name", "amy, jr").with("amount", 20.5),
            Row::new("c").with("name", "Bo").with("amount", 300.0),
        ]
        .into();
        let columns = vec![
            Column::new("name", "Name"),
            domain::transaction_columns().remove(2),
        ];
        TableEngine::new(
            rows,
            columns,
            TableOptions {
                page_size: 1,
                reset_page_on_data_change: true,
            },
        )
    }

    #[test]
    fn test_export_writes_all_pages_in_sorted_order() {
        let mut engine = engine();
        engine.set_sort("name");
        engine.set_page(2);

        let mut out = Vec::new();
        let count = export_csv(&engine, &mut out).unwrap();
        assert_eq!(count, 3);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Name,Amount");
        assert_eq!(lines[1], "\"amy, jr\",₹20.50");
        assert_eq!(lines[2], "Bo,₹300.00");
        assert_eq!(lines[3], "Zed,\"₹1,500.00\"");
    }

    #[test]
    fn test_export_empty_table_writes_header_only() {
        let engine = TableEngine::new(
            Rc::from(Vec::<Row>::new()),
            vec![Column::new("x", "X")],
            TableOptions::default(),
        );
        let mut out = Vec::new();
        assert_eq!(export_csv(&engine, &mut out).unwrap(), 0);
        assert_eq!(String::from_utf8(out).unwrap(), "X\n");
    }

    #[test]
    fn test_export_file_name_uses_timestamp() {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(export_file_name(now), "export-20240309-140507.csv");
    }

    #[test]
    fn test_export_to_dir_creates_file() {
        let dir = std::env::temp_dir().join(format!("pulse-tui-export-{}", std::process::id()));
        let now = Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let path = export_to_dir(&engine(), &dir, now).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.records().count(), 3);
        fs::remove_dir_all(&dir).unwrap();
    }
}
