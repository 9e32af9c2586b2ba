//! JSON document store.
//!
//! The whole tracker persists as one `offers.json` document under the data
//! root. Writes serialize the entire document to a temp file and rename it
//! into place; there is no partial update path, so concurrent writers get
//! last-write-wins full-document replacement.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::model::{Notification, Offer};

const STORE_FILE: &str = "offers.json";
const STORE_VERSION: u32 = 1;

/// The persisted document: schema version, offers, and the notification
/// cache (derived state, rebuilt by the periodic check).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDocument {
    pub version: u32,
    #[serde(default)]
    pub offers: Vec<Offer>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notifications: Vec<Notification>,
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self {
            version: STORE_VERSION,
            offers: Vec::new(),
            notifications: Vec::new(),
        }
    }
}

/// Handle to an opened store: the document plus the root it loads from and
/// saves to.
#[derive(Debug)]
pub struct Store {
    root: PathBuf,
    doc: StoreDocument,
}

impl Store {
    /// Create a fresh store under `root`. Fails if one already exists.
    pub fn init(root: &Path) -> Result<Self> {
        let file = root.join(STORE_FILE);
        if file.exists() {
            return Err(Error::AlreadyInitialized {
                path: root.to_path_buf(),
            });
        }
        fs::create_dir_all(root)?;

        let store = Self {
            root: root.to_path_buf(),
            doc: StoreDocument::default(),
        };
        store.save()?;
        info!(root = %root.display(), "store initialized");
        Ok(store)
    }

    /// Open an existing store under `root`.
    pub fn open(root: &Path) -> Result<Self> {
        let file = root.join(STORE_FILE);
        if !file.exists() {
            return Err(Error::NotInitialized {
                path: root.to_path_buf(),
            });
        }

        let content = fs::read_to_string(&file)?;
        let doc: StoreDocument =
            serde_json::from_str(&content).map_err(|source| Error::CorruptStore {
                path: file,
                source,
            })?;
        debug!(offers = doc.offers.len(), "store loaded");

        Ok(Self {
            root: root.to_path_buf(),
            doc,
        })
    }

    /// Persist the document atomically (temp file + rename).
    pub fn save(&self) -> Result<()> {
        let file = self.root.join(STORE_FILE);
        let tmp = self.root.join(format!("{STORE_FILE}.tmp"));

        let json = serde_json::to_string_pretty(&self.doc).map_err(|source| {
            Error::CorruptStore {
                path: file.clone(),
                source,
            }
        })?;
        fs::write(&tmp, json).map_err(|source| Error::StoreWrite {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &file).map_err(|source| Error::StoreWrite { path: file, source })?;
        debug!(offers = self.doc.offers.len(), "store saved");
        Ok(())
    }

    /// Path of the advisory lock file for this store.
    #[must_use]
    pub fn lock_path(root: &Path) -> PathBuf {
        root.join("store.lock")
    }

    #[must_use]
    pub fn offers(&self) -> &[Offer] {
        &self.doc.offers
    }

    /// Append a new offer.
    pub fn add_offer(&mut self, offer: Offer) {
        self.doc.offers.push(offer);
    }

    /// Look up one offer by exact id or unique prefix.
    pub fn find_offer(&self, idref: &str) -> Result<&Offer> {
        let index = self.find_index(idref)?;
        Ok(&self.doc.offers[index])
    }

    /// Mutate one offer in place through a closure, by exact id or unique
    /// prefix. The closure's return value passes through.
    pub fn with_offer_mut<R>(
        &mut self,
        idref: &str,
        f: impl FnOnce(&mut Offer) -> R,
    ) -> Result<R> {
        let index = self.find_index(idref)?;
        Ok(f(&mut self.doc.offers[index]))
    }

    fn find_index(&self, idref: &str) -> Result<usize> {
        if let Some(index) = self.doc.offers.iter().position(|o| o.id == idref) {
            return Ok(index);
        }

        let matches: Vec<usize> = self
            .doc
            .offers
            .iter()
            .enumerate()
            .filter(|(_, o)| o.id.starts_with(idref))
            .map(|(i, _)| i)
            .collect();
        match matches.as_slice() {
            [] => Err(Error::OfferNotFound {
                idref: idref.to_string(),
            }),
            [index] => Ok(*index),
            _ => Err(Error::AmbiguousId {
                idref: idref.to_string(),
                count: matches.len(),
            }),
        }
    }

    /// Take the notification cache out of the document (leaves it empty).
    #[must_use]
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.doc.notifications)
    }

    /// Put an updated notification list back into the document.
    pub fn set_notifications(&mut self, notifications: Vec<Notification>) {
        self.doc.notifications = notifications;
    }

    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.doc.notifications
    }
}

#[cfg(test)]
mod tests {
    use super::Store;
    use crate::error::{Error, ErrorCode};
    use crate::model::Offer;
    use chrono::{TimeZone, Utc};

    fn offer(id: &str) -> Offer {
        Offer::new(
            id.into(),
            "CASE-1".into(),
            "phone".into(),
            "new".into(),
            Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).single().expect("valid ts"),
        )
    }

    #[test]
    fn init_then_open_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = Store::init(dir.path()).expect("init");
        store.add_offer(offer("of-abc123"));
        store.save().expect("save");

        let reopened = Store::open(dir.path()).expect("open");
        assert_eq!(reopened.offers().len(), 1);
        assert_eq!(reopened.offers()[0].id, "of-abc123");
    }

    #[test]
    fn init_twice_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        Store::init(dir.path()).expect("first init");
        let err = Store::init(dir.path()).expect_err("second init");
        assert_eq!(err.code(), ErrorCode::AlreadyInitialized);
    }

    #[test]
    fn open_without_init_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = Store::open(dir.path()).expect_err("no store");
        assert_eq!(err.code(), ErrorCode::NotInitialized);
    }

    #[test]
    fn corrupt_json_is_reported_as_such() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("offers.json"), "{not json").expect("write");
        let err = Store::open(dir.path()).expect_err("corrupt");
        assert_eq!(err.code(), ErrorCode::CorruptStore);
    }

    #[test]
    fn prefix_lookup_resolves_unique_matches() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = Store::init(dir.path()).expect("init");
        store.add_offer(offer("of-abc123"));
        store.add_offer(offer("of-xyz789"));

        assert_eq!(store.find_offer("of-abc").expect("unique prefix").id, "of-abc123");
        assert!(matches!(
            store.find_offer("of-"),
            Err(Error::AmbiguousId { count: 2, .. })
        ));
        assert!(matches!(
            store.find_offer("of-zzz"),
            Err(Error::OfferNotFound { .. })
        ));
    }

    #[test]
    fn exact_id_wins_over_prefix_ambiguity() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = Store::init(dir.path()).expect("init");
        store.add_offer(offer("of-abc"));
        store.add_offer(offer("of-abc123"));

        assert_eq!(store.find_offer("of-abc").expect("exact match").id, "of-abc");
    }

    #[test]
    fn with_offer_mut_persists_through_save() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = Store::init(dir.path()).expect("init");
        store.add_offer(offer("of-abc123"));

        store
            .with_offer_mut("of-abc123", |o| o.notes = Some("called twice".into()))
            .expect("mutate");
        store.save().expect("save");

        let reopened = Store::open(dir.path()).expect("open");
        assert_eq!(reopened.offers()[0].notes.as_deref(), Some("called twice"));
    }
}
