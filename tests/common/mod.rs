//! Shared test infrastructure: builds an element snapshot in a tempdir and
//! runs the built binary against it.

use rusqlite::Connection;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

pub struct Fixture {
    // Held so the tempdir outlives the test.
    _dir: TempDir,
    pub db_path: PathBuf,
}

/// A three-element snapshot with the schema the loader expects.
pub fn fixture() -> Fixture {
    let dir = tempfile::tempdir().expect("create tempdir");
    let db_path = dir.path().join("elements.db");
    let conn = Connection::open(&db_path).expect("create snapshot");
    conn.execute_batch(
        "CREATE TABLE elements (
             atomic_number INTEGER NOT NULL,
             atomic_weight REAL NOT NULL,
             symbol TEXT NOT NULL,
             name TEXT NOT NULL,
             series_id INTEGER NOT NULL
         );
         CREATE TABLE series (id INTEGER NOT NULL, name TEXT NOT NULL);
         CREATE TABLE oxidationstates (
             atomic_number INTEGER NOT NULL,
             oxidation_state INTEGER NOT NULL
         );
         INSERT INTO series VALUES (1, 'Nonmetal'), (2, 'Noble gas'), (3, 'Alkali metal');
         INSERT INTO elements VALUES (3, 6.94, 'Li', 'Lithium', 3);
         INSERT INTO elements VALUES (1, 1.008, 'H', 'Hydrogen', 1);
         INSERT INTO elements VALUES (2, 4.0026, 'He', 'Helium', 2);
         INSERT INTO oxidationstates VALUES (1, 1), (1, -1), (3, 1);",
    )
    .expect("seed snapshot");
    Fixture {
        _dir: dir,
        db_path,
    }
}

/// Run `ptable list --db <fixture>` with extra arguments appended.
pub fn run_list(fixture: &Fixture, extra: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ptable"));
    cmd.arg("list").arg("--db").arg(&fixture.db_path);
    for arg in extra {
        cmd.arg(arg);
    }
    cmd.output().expect("run ptable list")
}
