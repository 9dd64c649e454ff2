use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{json, Value};
use tracing::info;

use crate::table::ResultTable;

/// Write the table as CSV, one header row plus one row per student. Absent
/// cells render as empty fields.
pub fn write_csv(table: &ResultTable, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        let cells = table
            .columns
            .iter()
            .map(|col| row.get(col).unwrap_or_default());
        writer.write_record(cells)?;
    }
    writer.flush()?;
    info!(rows = table.rows.len(), path = %path.display(), "wrote CSV");
    Ok(())
}

/// Write the table as `{"columns": [...], "rows": [[...]]}` so the column
/// order survives serialization. Absent cells render as `null`.
pub fn write_json(table: &ResultTable, path: &Path) -> Result<()> {
    let rows: Vec<Value> = table
        .rows
        .iter()
        .map(|row| {
            table
                .columns
                .iter()
                .map(|col| match row.get(col) {
                    Some(v) => Value::String(v.to_string()),
                    None => Value::Null,
                })
                .collect::<Vec<Value>>()
                .into()
        })
        .collect();

    let doc = json!({ "columns": table.columns, "rows": rows });
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &doc)?;
    writer.write_all(b"\n")?;
    info!(rows = table.rows.len(), path = %path.display(), "wrote JSON");
    Ok(())
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{reconcile, StudentRecord};

    fn sample_table() -> ResultTable {
        let mut a = StudentRecord::default();
        a.set("PRN", "2021001");
        a.set("Name", "FIRST STUDENT");
        a.set("MTH-101_GRD", "A");
        let mut b = StudentRecord::default();
        b.set("PRN", "2021002");
        b.set("Name", "SECOND STUDENT");
        reconcile(vec![a, b])
    }

    #[test]
    fn csv_roundtrips_header_and_absent_cells() {
        let dir = std::env::temp_dir();
        let path = dir.join("marksheet_export_test.csv");
        write_csv(&sample_table(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("PRN,Seat No,Name"));
        assert!(header.ends_with("MTH-101_GRD"));
        // Second student never saw MTH-101: last cell is empty.
        let second = lines.nth(1).unwrap();
        assert!(second.ends_with(','));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn json_uses_null_for_absent_cells() {
        let dir = std::env::temp_dir();
        let path = dir.join("marksheet_export_test.json");
        write_json(&sample_table(), &path).unwrap();

        let doc: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let columns = doc["columns"].as_array().unwrap();
        assert_eq!(columns[0], "PRN");
        let rows = doc["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        let last_cell = rows[1].as_array().unwrap().last().unwrap();
        assert!(last_cell.is_null());
        std::fs::remove_file(&path).ok();
    }
}
