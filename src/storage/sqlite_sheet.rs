use std::path::Path;

use rusqlite::{params, Connection};

use super::sheet::{SheetClient, Table};
use crate::types::{Result, StoreError};

const DB_SCHEMA_VERSION: i64 = 1;

/// A worksheet service kept in a SQLite file. Every worksheet is a grid of
/// text cells; row 0 holds the headers.
#[derive(Clone, Debug)]
pub struct SqliteSheet {
    pub path: String,
}

impl SqliteSheet {
    /// Opens the database and checks its schema. Failure here means the sheet
    /// service is unreachable and the session cannot start.
    pub fn connect<P: AsRef<Path>>(path: P) -> Result<Self> {
        let sheet = Self {
            path: path.as_ref().to_string_lossy().to_string(),
        };
        sheet.with_conn(|_conn| Ok(())).map_err(|e| match e {
            StoreError::SchemaMismatch { .. } => e,
            other => StoreError::Connection(format!("{}: {}", sheet.path, other)),
        })?;
        log::info!("📊 Connected to sheet store {}", sheet.path);
        Ok(sheet)
    }

    fn open(&self) -> rusqlite::Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.busy_timeout(std::time::Duration::from_millis(500))?;
        Ok(conn)
    }

    fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        let mut conn = self.open()?;
        Self::migrate(&conn)?;
        f(&mut conn)
    }

    fn migrate(conn: &Connection) -> Result<()> {
        let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

        if version == DB_SCHEMA_VERSION {
            return Ok(());
        }
        if version != 0 {
            return Err(StoreError::SchemaMismatch {
                expected: DB_SCHEMA_VERSION,
                found: version,
            });
        }

        log::info!("SQLite sheet schema install: {} -> {}", version, DB_SCHEMA_VERSION);
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS cells (
                worksheet TEXT NOT NULL,
                row_idx INTEGER NOT NULL,
                col_idx INTEGER NOT NULL,
                value TEXT NOT NULL,
                PRIMARY KEY (worksheet, row_idx, col_idx)
            );
            "#,
        )?;
        conn.pragma_update(None, "user_version", DB_SCHEMA_VERSION)?;
        Ok(())
    }
}

fn db_read_cells(conn: &Connection, worksheet: &str) -> rusqlite::Result<Vec<(usize, usize, String)>> {
    let mut stmt = conn.prepare(
        "SELECT row_idx, col_idx, value FROM cells WHERE worksheet = ?1 ORDER BY row_idx, col_idx",
    )?;
    let cells = stmt
        .query_map(params![worksheet], |row| {
            let r: i64 = row.get(0)?;
            let c: i64 = row.get(1)?;
            let v: String = row.get(2)?;
            Ok((r as usize, c as usize, v))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(cells)
}

fn grid_from_cells(cells: Vec<(usize, usize, String)>) -> Vec<Vec<String>> {
    let mut grid: Vec<Vec<String>> = Vec::new();
    for (r, c, value) in cells {
        if grid.len() <= r {
            grid.resize_with(r + 1, Vec::new);
        }
        let row = &mut grid[r];
        if row.len() <= c {
            row.resize(c + 1, String::new());
        }
        row[c] = value;
    }
    grid
}

impl SheetClient for SqliteSheet {
    fn resource_id(&self) -> String {
        let canonical = std::fs::canonicalize(&self.path)
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|_| self.path.clone());
        format!("sqlite:{canonical}")
    }

    fn read(&self, worksheet: &str) -> Result<Table> {
        self.with_conn(|conn| {
            let cells = db_read_cells(conn, worksheet)?;
            if cells.is_empty() {
                return Err(StoreError::WorksheetMissing(worksheet.to_string()));
            }
            let mut grid = grid_from_cells(cells).into_iter();
            let headers = grid.next().unwrap_or_default();
            Ok(Table {
                headers,
                rows: grid.collect(),
            })
        })
    }

    fn update(&self, worksheet: &str, table: &Table) -> Result<()> {
        self.with_conn(|conn| {
            let tx = conn.transaction()?;
            tx.execute("DELETE FROM cells WHERE worksheet = ?1", params![worksheet])?;
            {
                let mut insert = tx.prepare(
                    "INSERT INTO cells (worksheet, row_idx, col_idx, value) VALUES (?1, ?2, ?3, ?4)",
                )?;
                let all_rows = std::iter::once(&table.headers).chain(table.rows.iter());
                for (r, row) in all_rows.enumerate() {
                    for (c, value) in row.iter().enumerate() {
                        insert.execute(params![worksheet, r as i64, c as i64, value])?;
                    }
                }
            }
            tx.commit()?;
            Ok(())
        })
    }
}
