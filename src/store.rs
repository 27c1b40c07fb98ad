//! The credential store.
//!
//! Persistent storage itself is out of scope here; this module is a
//! thin, read-only adapter over a `redb` keyed bucket store with two
//! tables — `config` (server cert/key/connection password) and `opers`
//! (per-operator password digests) — mirroring the "opaque bucket
//! store" the core is specified against.

use std::path::Path;

use redb::{Database, ReadableTable, TableDefinition};

use crate::error::ServerError;

const CONFIG_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("config");
const OPERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("opers");

/// Read-only handle onto the credential store. Every lookup opens its
/// own read transaction; `redb` transactions are cheap and this keeps
/// the store free of any locking of its own.
pub struct CredentialStore {
    db: Database,
}

impl CredentialStore {
    pub fn open(path: &Path) -> Result<Self, ServerError> {
        let db = Database::create(path).map_err(|e| ServerError::Store(e.to_string()))?;
        Ok(CredentialStore { db })
    }

    fn get(&self, table: TableDefinition<&str, &[u8]>, key: &str) -> Result<Option<Vec<u8>>, ServerError> {
        let txn = self
            .db
            .begin_read()
            .map_err(|e| ServerError::Store(e.to_string()))?;
        let table = match txn.open_table(table) {
            Ok(t) => t,
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(ServerError::Store(e.to_string())),
        };
        Ok(table
            .get(key)
            .map_err(|e| ServerError::Store(e.to_string()))?
            .map(|v| v.value().to_vec()))
    }

    pub fn get_config(&self, key: &str) -> Result<Option<Vec<u8>>, ServerError> {
        self.get(CONFIG_TABLE, key)
    }

    /// Look up `<oper_name>:<key>` in the `opers` table, modeling the
    /// one-sub-bucket-per-operator layout as a flattened key, since
    /// `redb` tables don't nest.
    pub fn get_oper(&self, oper_name: &str, key: &str) -> Result<Option<Vec<u8>>, ServerError> {
        self.get(OPERS_TABLE, &format!("{oper_name}:{key}"))
    }

    /// The server's TLS certificate and private key, PEM-encoded, if
    /// the store has them.
    pub fn cert_and_key(&self) -> Result<Option<(Vec<u8>, Vec<u8>)>, ServerError> {
        let cert = self.get_config("cert")?;
        let key = self.get_config("key")?;
        Ok(cert.zip(key))
    }

    /// The connection password digest and salt, if a connection
    /// password was provisioned.
    pub fn connection_password(&self) -> Result<Option<(Vec<u8>, Vec<u8>)>, ServerError> {
        let digest = self.get_config("pass")?;
        let salt = self.get_config("salt")?;
        Ok(digest.zip(salt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redb::WriteTransaction;

    fn write_kv(db: &Database, table: TableDefinition<&str, &[u8]>, key: &str, value: &[u8]) {
        let txn: WriteTransaction = db.begin_write().unwrap();
        {
            let mut t = txn.open_table(table).unwrap();
            t.insert(key, value).unwrap();
        }
        txn.commit().unwrap();
    }

    #[test]
    fn missing_table_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::open(&dir.path().join("creds.redb")).unwrap();
        assert_eq!(store.get_config("pass").unwrap(), None);
    }

    #[test]
    fn reads_back_stored_connection_password() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("creds.redb");
        let store = CredentialStore::open(&path).unwrap();
        write_kv(&store.db, CONFIG_TABLE, "pass", b"digestbytes");
        write_kv(&store.db, CONFIG_TABLE, "salt", b"saltbytes");
        let (digest, salt) = store.connection_password().unwrap().unwrap();
        assert_eq!(digest, b"digestbytes");
        assert_eq!(salt, b"saltbytes");
    }

    #[test]
    fn oper_lookup_flattens_sub_bucket_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("creds.redb");
        let store = CredentialStore::open(&path).unwrap();
        write_kv(&store.db, OPERS_TABLE, "alfred:pass", b"opdigest");
        assert_eq!(store.get_oper("alfred", "pass").unwrap(), Some(b"opdigest".to_vec()));
        assert_eq!(store.get_oper("robin", "pass").unwrap(), None);
    }
}
