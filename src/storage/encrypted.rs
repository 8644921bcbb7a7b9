//! SQLite-backed key-value table with AES-GCM encryption of every stored value.
//! Key derived from a configured secret (SHA-256).

use super::{check_quota, KeyValueStore};
use crate::error::{Error, Result};
use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rand::RngCore;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const NONCE_LEN: usize = 12;
const KEY_LEN: usize = 32;

fn derive_key(seed: &[u8]) -> [u8; KEY_LEN] {
    use ring::digest;
    let mut out = [0u8; KEY_LEN];
    let h = digest::digest(&digest::SHA256, seed);
    out[..h.as_ref().len().min(KEY_LEN)].copy_from_slice(h.as_ref());
    out
}

fn encrypt(key: &[u8; KEY_LEN], plaintext: &[u8]) -> Result<String> {
    let cipher = Aes256Gcm::new_from_slice(key).map_err(|e| Error::Crypto(e.to_string()))?;
    let mut nonce = [0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut nonce);
    let ciphertext = cipher
        .encrypt((&nonce).into(), plaintext)
        .map_err(|_| Error::Crypto("encryption failed".into()))?;
    let mut out = nonce.to_vec();
    out.extend(ciphertext);
    Ok(BASE64.encode(&out))
}

fn decrypt(key: &[u8; KEY_LEN], encoded: &str) -> Result<Vec<u8>> {
    let raw = BASE64
        .decode(encoded)
        .map_err(|e| Error::Crypto(e.to_string()))?;
    if raw.len() < NONCE_LEN {
        return Err(Error::Crypto("payload too short".into()));
    }
    let (nonce, ct) = raw.split_at(NONCE_LEN);
    let cipher = Aes256Gcm::new_from_slice(key).map_err(|e| Error::Crypto(e.to_string()))?;
    cipher
        .decrypt(nonce.into(), ct)
        .map_err(|_| Error::Crypto("decryption failed".into()))
}

pub struct SecureStore {
    conn: Mutex<Connection>,
    key: [u8; KEY_LEN],
    quota_bytes: Option<usize>,
}

impl SecureStore {
    /// Open or create DB at path. Key is derived from `secret`.
    pub fn open(path: &Path, secret: &[u8]) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                k TEXT PRIMARY KEY,
                v_enc TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );
            "#,
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
            key: derive_key(secret),
            quota_bytes: None,
        })
    }

    /// Reject writes whose encrypted value is longer than `quota_bytes`.
    pub fn with_quota(mut self, quota_bytes: Option<usize>) -> Self {
        self.quota_bytes = quota_bytes;
        self
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Store a raw (already encoded) value, bypassing encryption.
    #[doc(hidden)]
    pub fn set_raw(&self, key: &str, encoded: &str) -> Result<()> {
        self.conn().execute(
            "INSERT OR REPLACE INTO kv (k, v_enc, updated_at) VALUES (?1, ?2, ?3)",
            params![key, encoded, chrono::Utc::now().timestamp_millis()],
        )?;
        Ok(())
    }
}

impl KeyValueStore for SecureStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let enc: Option<String> = self
            .conn()
            .query_row("SELECT v_enc FROM kv WHERE k = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        let Some(enc) = enc else {
            return Ok(None);
        };
        let plain = decrypt(&self.key, &enc)?;
        let value = String::from_utf8(plain).map_err(|e| Error::Crypto(e.to_string()))?;
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let enc = encrypt(&self.key, value.as_bytes())?;
        check_quota(self.quota_bytes, enc.len())?;
        self.set_raw(key, &enc)
    }
}
