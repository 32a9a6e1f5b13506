//! Template file storage.
//!
//! The whole mapping lives in one JSON object keyed by template name and is
//! rewritten in full after every change.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::model::Template;

/// Mapping from template name to template, in name order.
pub type Templates = BTreeMap<String, Template>;

/// Errors reading or writing the template file.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// The file exists but could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// Template file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The file is not a JSON object of templates.
    #[error("Malformed template file {}: {source}", path.display())]
    Malformed {
        /// Template file path.
        path: PathBuf,
        /// Parse error.
        source: serde_json::Error,
    },

    /// The mapping could not be encoded.
    #[error("Failed to encode templates: {0}")]
    Encode(#[source] serde_json::Error),

    /// The file could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Template file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// Reads the template file.
///
/// A missing or blank file yields an empty mapping.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not well-formed.
pub fn load(path: &Path) -> Result<Templates, PersistenceError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Templates::new()),
        Err(source) => {
            return Err(PersistenceError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if contents.trim().is_empty() {
        return Ok(Templates::new());
    }

    serde_json::from_str(&contents).map_err(|source| PersistenceError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Rewrites the template file with the whole mapping.
///
/// Output is four-space indented and keeps non-ASCII text as-is. The data
/// goes to a sibling temporary file first, which then replaces the target.
///
/// # Errors
///
/// Returns an error if encoding or any filesystem step fails.
pub fn save(path: &Path, templates: &Templates) -> Result<(), PersistenceError> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    templates
        .serialize(&mut serializer)
        .map_err(PersistenceError::Encode)?;
    buf.push(b'\n');

    let write_err = |source| PersistenceError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let tmp_path = temp_path(path);
    std::fs::write(&tmp_path, &buf).map_err(write_err)?;
    std::fs::rename(&tmp_path, path).map_err(|source| {
        let _ = std::fs::remove_file(&tmp_path);
        write_err(source)
    })
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Write-through store of named templates.
///
/// Every mutation rewrites the backing file before returning. When the write
/// fails the mutation is undone, so memory and disk never disagree.
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    path: Option<PathBuf>,
    templates: Templates,
}

impl TemplateStore {
    /// Opens the store backed by `path`, loading any existing templates.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let path = path.into();
        let templates = load(&path)?;
        tracing::info!(
            "Loaded {} template(s) from {}",
            templates.len(),
            path.display()
        );
        Ok(Self {
            path: Some(path),
            templates,
        })
    }

    /// Creates a store with no backing file.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Backing file path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns the template stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Returns `true` if a template is stored under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Template names in enumeration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    /// Number of stored templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Returns `true` if no templates are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// The full mapping.
    #[must_use]
    pub const fn templates(&self) -> &Templates {
        &self.templates
    }

    /// Stores `template` under `name`, replacing any previous one.
    ///
    /// Returns the replaced template.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written; the store is left as
    /// it was.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        template: Template,
    ) -> Result<Option<Template>, PersistenceError> {
        let name = name.into();
        let previous = self.templates.insert(name.clone(), template);

        if let Err(e) = self.persist() {
            match previous {
                Some(old) => self.templates.insert(name, old),
                None => self.templates.remove(&name),
            };
            return Err(e);
        }

        Ok(previous)
    }

    /// Removes the template stored under `name`.
    ///
    /// Absent names are a no-op and do not touch the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written; the template is kept.
    pub fn delete(&mut self, name: &str) -> Result<Option<Template>, PersistenceError> {
        let Some(removed) = self.templates.remove(name) else {
            return Ok(None);
        };

        if let Err(e) = self.persist() {
            self.templates.insert(name.to_string(), removed);
            return Err(e);
        }

        Ok(Some(removed))
    }

    fn persist(&self) -> Result<(), PersistenceError> {
        match &self.path {
            Some(path) => save(path, &self.templates),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn invoice() -> Template {
        Template {
            recipient: "a@x.com".to_string(),
            cc: String::new(),
            subject: "Inv #1".to_string(),
            body: "see attached".to_string(),
            attachments: vec!["/tmp/a.pdf".to_string()],
        }
    }

    #[test]
    fn test_missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = TemplateStore::open(dir.path().join("email_templates.json")).unwrap();
        assert!(store.is_empty());
        assert!(!dir.path().join("email_templates.json").exists());
    }

    #[test]
    fn test_first_insert_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("email_templates.json");

        let mut store = TemplateStore::open(&path).unwrap();
        store.insert("Invoice", invoice()).unwrap();

        assert!(path.exists());
        assert_eq!(load(&path).unwrap().get("Invoice"), Some(&invoice()));
    }

    #[test]
    fn test_insert_overwrites_entirely() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.json");
        let mut store = TemplateStore::open(&path).unwrap();

        store.insert("Invoice", invoice()).unwrap();
        let replacement = Template {
            subject: "New subject".to_string(),
            ..Template::default()
        };
        let previous = store.insert("Invoice", replacement.clone()).unwrap();

        assert_eq!(previous, Some(invoice()));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("Invoice"), Some(&replacement));
        assert_eq!(TemplateStore::open(&path).unwrap().get("Invoice"), Some(&replacement));
    }

    #[test]
    fn test_delete_writes_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.json");
        let mut store = TemplateStore::open(&path).unwrap();
        store.insert("A", invoice()).unwrap();
        store.insert("B", Template::default()).unwrap();

        assert_eq!(store.delete("A").unwrap(), Some(invoice()));

        let reloaded = TemplateStore::open(&path).unwrap();
        assert_eq!(reloaded.names().collect::<Vec<_>>(), ["B"]);
    }

    #[test]
    fn test_delete_absent_is_noop() {
        let mut store = TemplateStore::in_memory();
        assert_eq!(store.delete("missing").unwrap(), None);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = TemplateStore::open(&path).unwrap_err();
        assert!(matches!(err, PersistenceError::Malformed { .. }));
    }

    #[test]
    fn test_wrong_shape_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.json");
        std::fs::write(&path, r#"["not", "a", "map"]"#).unwrap();

        assert!(matches!(
            load(&path),
            Err(PersistenceError::Malformed { .. })
        ));
    }

    #[test]
    fn test_blank_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.json");
        std::fs::write(&path, "\n").unwrap();

        assert!(load(&path).unwrap().is_empty());
    }

    #[test]
    fn test_file_keeps_unicode_and_indentation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.json");
        let mut templates = Templates::new();
        templates.insert(
            "Счёт".to_string(),
            Template {
                subject: "Тема письма ✉".to_string(),
                ..Template::default()
            },
        );

        save(&path, &templates).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"Счёт\""));
        assert!(raw.contains("Тема письма ✉"));
        assert!(raw.contains("\n    \"Счёт\": {\n        \"recipient\""));
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        // Parent path is a regular file, so every write fails.
        let path = blocker.join("t.json");

        let mut store = TemplateStore {
            path: Some(path),
            templates: Templates::new(),
        };

        assert!(matches!(
            store.insert("Invoice", invoice()),
            Err(PersistenceError::Write { .. })
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_failed_delete_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let path = blocker.join("t.json");

        let mut store = TemplateStore {
            path: Some(path),
            templates: Templates::from([("Invoice".to_string(), invoice())]),
        };

        assert!(matches!(
            store.delete("Invoice"),
            Err(PersistenceError::Write { .. })
        ));
        assert_eq!(store.get("Invoice"), Some(&invoice()));
        assert_eq!(store.len(), 1);
    }

    fn template_strategy() -> impl Strategy<Value = Template> {
        (
            any::<String>(),
            any::<String>(),
            any::<String>(),
            any::<String>(),
            prop::collection::vec(any::<String>(), 0..5),
        )
            .prop_map(|(recipient, cc, subject, body, attachments)| Template {
                recipient,
                cc,
                subject,
                body,
                attachments,
            })
    }

    proptest! {
        #[test]
        fn test_save_load_round_trip(name in any::<String>(), template in template_strategy()) {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("t.json");
            let mut templates = Templates::new();
            templates.insert(name, template);

            save(&path, &templates).unwrap();
            prop_assert_eq!(load(&path).unwrap(), templates);
        }
    }
}
