//! In-memory CSV tables and the context shown to the model.

use crate::error::{AgentError, Result};
use csv::ReaderBuilder;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Inferred role of a CSV column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Float,
    Text,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Portuguese labels: these strings end up in the model prompt.
        let label = match self {
            ColumnType::Integer => "inteiro",
            ColumnType::Float => "decimal",
            ColumnType::Text => "texto",
        };
        write!(f, "{label}")
    }
}

/// A loaded CSV file with inferred column types.
#[derive(Debug, Clone)]
pub struct CsvTable {
    path: PathBuf,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    column_types: Vec<ColumnType>,
}

impl CsvTable {
    /// Load a CSV file, resolving the file name case-insensitively within
    /// its directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let resolved = resolve_case_insensitive(path)
            .ok_or_else(|| AgentError::table(format!("arquivo não encontrado: {}", path.display())))?;

        let mut reader = ReaderBuilder::new().has_headers(true).from_path(&resolved)?;
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() {
            return Err(AgentError::table("arquivo CSV sem cabeçalho"));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect::<Vec<String>>());
        }

        let column_types = infer_types(&headers, &rows);
        Ok(Self {
            path: resolved,
            headers,
            rows,
            column_types,
        })
    }

    /// Path the table was actually loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_types(&self) -> &[ColumnType] {
        &self.column_types
    }

    /// One line per column: name and inferred type.
    pub fn schema_summary(&self) -> String {
        let mut out = String::new();
        for (header, column_type) in self.headers.iter().zip(&self.column_types) {
            out.push_str(&format!("- {header} ({column_type})\n"));
        }
        out
    }

    /// The first rows in CSV form, for prompt context.
    pub fn sample_rows(&self, limit: usize) -> String {
        let mut out = self.headers.join(",");
        out.push('\n');
        for row in self.rows.iter().take(limit) {
            out.push_str(&row.join(","));
            out.push('\n');
        }
        out
    }
}

fn infer_types(headers: &[String], rows: &[Vec<String>]) -> Vec<ColumnType> {
    (0..headers.len())
        .map(|column| {
            let mut seen_value = false;
            let mut all_integer = true;
            let mut all_float = true;
            for row in rows {
                let Some(value) = row.get(column) else { continue };
                let value = value.trim();
                if value.is_empty() {
                    continue;
                }
                seen_value = true;
                if value.parse::<i64>().is_err() {
                    all_integer = false;
                }
                if value.parse::<f64>().is_err() {
                    all_float = false;
                }
            }
            if !seen_value {
                ColumnType::Text
            } else if all_integer {
                ColumnType::Integer
            } else if all_float {
                ColumnType::Float
            } else {
                ColumnType::Text
            }
        })
        .collect()
}

/// Find `path`'s file name inside its parent directory, ignoring case.
pub fn resolve_case_insensitive(path: &Path) -> Option<PathBuf> {
    if path.exists() {
        return Some(path.to_path_buf());
    }
    let parent = path.parent().filter(|parent| !parent.as_os_str().is_empty())?;
    let target = path.file_name()?.to_str()?.to_lowercase();
    for entry in fs::read_dir(parent).ok()?.flatten() {
        let name = entry.file_name();
        if name.to_str().is_some_and(|name| name.to_lowercase() == target) {
            return Some(parent.join(name));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_csv(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn load_infers_column_types() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "vendas.csv",
            "produto,total,nota\nArroz,1290,4.5\nFeijão,410,3.8\n",
        );
        let table = CsvTable::load(&path).unwrap();
        assert_eq!(table.headers(), ["produto", "total", "nota"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(
            table.column_types(),
            [ColumnType::Text, ColumnType::Integer, ColumnType::Float]
        );
    }

    #[test]
    fn load_resolves_file_names_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        write_csv(&dir, "vendas.csv", "a\n1\n");
        let requested = dir.path().join("VENDAS.CSV");
        let table = CsvTable::load(&requested).unwrap();
        assert!(table.path().ends_with("vendas.csv"));
    }

    #[test]
    fn missing_file_is_a_table_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CsvTable::load(dir.path().join("nada.csv")).unwrap_err();
        assert!(err.to_string().contains("não encontrado"));
    }

    #[test]
    fn empty_cells_do_not_break_inference() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "dados.csv", "a,b\n1,\n2,x\n");
        let table = CsvTable::load(&path).unwrap();
        assert_eq!(table.column_types(), [ColumnType::Integer, ColumnType::Text]);
    }

    #[test]
    fn sample_rows_is_bounded() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "dados.csv", "a\n1\n2\n3\n");
        let table = CsvTable::load(&path).unwrap();
        let sample = table.sample_rows(2);
        assert_eq!(sample.lines().count(), 3);
    }
}
