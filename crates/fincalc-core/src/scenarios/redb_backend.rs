//! Embedded key-value backend on top of redb.

use std::path::Path;

use redb::{Database, ReadableTable, TableDefinition};

use crate::scenarios::backend::ScenarioBackend;
use crate::FinCalcResult;

const SCENARIOS_TABLE: TableDefinition<&str, &str> = TableDefinition::new("scenarios");

pub struct RedbBackend {
    db: Database,
}

impl RedbBackend {
    /// Open or create the database file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> FinCalcResult<Self> {
        let db = Database::create(path)?;
        let write_txn = db.begin_write()?;
        {
            // Create the table up front so read transactions can open it.
            let _ = write_txn.open_table(SCENARIOS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(Self { db })
    }
}

impl ScenarioBackend for RedbBackend {
    fn backend_name(&self) -> &'static str {
        "redb"
    }

    fn read(&self, key: &str) -> FinCalcResult<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SCENARIOS_TABLE)?;
        let value = table.get(key)?.map(|guard| guard.value().to_string());
        Ok(value)
    }

    fn write(&self, key: &str, payload: &str) -> FinCalcResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SCENARIOS_TABLE)?;
            table.insert(key, payload)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redb_backend_persists_across_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("scenarios.redb");
        {
            let backend = RedbBackend::open(&path).unwrap();
            assert_eq!(backend.read("k").unwrap(), None);
            backend.write("k", "[\"a\"]").unwrap();
        }
        let reopened = RedbBackend::open(&path).unwrap();
        assert_eq!(reopened.read("k").unwrap().as_deref(), Some("[\"a\"]"));
    }
}
