//! Persisted key-value preference storage
//!
//! `PreferenceStore` is the capability the counter logic is written against.
//! `FilePreferenceStore` persists to a TOML file, `MemoryPreferenceStore`
//! keeps everything in a map for tests and embedders that own persistence.

use crate::core::error::{GateError, GateResult, StorageError};
use std::cell::{Ref, RefCell};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use toml_edit::{DocumentMut, Item, Value};

/// Get/set of namespaced preference values
///
/// Reads return `Ok(None)` for absent keys. Every write is durable before
/// it returns.
pub trait PreferenceStore {
  fn get_int(&self, key: &str) -> GateResult<Option<u64>>;
  fn set_int(&mut self, key: &str, value: u64) -> GateResult<()>;
  fn get_bool(&self, key: &str) -> GateResult<Option<bool>>;
  fn set_bool(&mut self, key: &str, value: bool) -> GateResult<()>;
  fn get_string(&self, key: &str) -> GateResult<Option<String>>;
  fn set_string(&mut self, key: &str, value: &str) -> GateResult<()>;

  /// Write several keys as one unit: either all of them land or none do
  fn set_many(&mut self, entries: &[(String, PrefValue)]) -> GateResult<()>;
}

/// TOML-file preference store
///
/// The file is parsed on first access and kept in memory afterwards. Each
/// mutation edits a copy of the document, writes it through a synced temp
/// file and a rename, and only then replaces the cached copy. A failed write
/// leaves both the file and the cache as they were. Keys the gate does not
/// own are preserved as written.
pub struct FilePreferenceStore {
  path: PathBuf,
  doc: RefCell<Option<DocumentMut>>,
}

impl FilePreferenceStore {
  /// Point at a preference file; nothing is read until first access
  pub fn open(path: impl Into<PathBuf>) -> Self {
    Self {
      path: path.into(),
      doc: RefCell::new(None),
    }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  fn access_error(&self, reason: impl ToString) -> GateError {
    GateError::Storage(StorageError::Access {
      path: self.path.clone(),
      reason: reason.to_string(),
    })
  }

  fn read_document(&self) -> GateResult<DocumentMut> {
    if !self.path.exists() {
      tracing::debug!(path = %self.path.display(), "preference store absent, starting empty");
      return Ok(DocumentMut::new());
    }

    let content = fs::read_to_string(&self.path).map_err(|e| self.access_error(e))?;
    let doc = content.parse::<DocumentMut>().map_err(|e| self.access_error(e))?;
    tracing::debug!(path = %self.path.display(), "preference store loaded");
    Ok(doc)
  }

  fn loaded(&self) -> GateResult<Ref<'_, DocumentMut>> {
    if self.doc.borrow().is_none() {
      let doc = self.read_document()?;
      *self.doc.borrow_mut() = Some(doc);
    }

    Ref::filter_map(self.doc.borrow(), Option::as_ref).map_err(|_| self.access_error("document not loaded"))
  }

  fn item(&self, key: &str) -> GateResult<Option<Item>> {
    Ok(self.loaded()?.get(key).cloned())
  }

  /// Apply `edit` to a copy of the document, persist it, then swap it in
  fn mutate(&mut self, keys: &[&str], edit: impl FnOnce(&mut DocumentMut)) -> GateResult<()> {
    let mut next = match self.doc.get_mut() {
      Some(doc) => doc.clone(),
      None => self.read_document()?,
    };

    edit(&mut next);
    self.persist(&next.to_string())?;
    *self.doc.get_mut() = Some(next);

    tracing::debug!(path = %self.path.display(), keys = ?keys, "preference written");
    Ok(())
  }

  fn persist(&self, content: &str) -> GateResult<()> {
    if let Some(parent) = self.path.parent()
      && !parent.as_os_str().is_empty()
    {
      fs::create_dir_all(parent).map_err(|e| self.access_error(e))?;
    }

    let mut tmp = self.path.clone().into_os_string();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    {
      let mut file = File::create(&tmp).map_err(|e| self.access_error(e))?;
      file.write_all(content.as_bytes()).map_err(|e| self.access_error(e))?;
      file.sync_all().map_err(|e| self.access_error(e))?;
    }
    fs::rename(&tmp, &self.path).map_err(|e| self.access_error(e))?;
    Ok(())
  }
}

fn toml_item(key: &str, value: &PrefValue) -> GateResult<Item> {
  Ok(match value {
    PrefValue::Int(n) => {
      let n = i64::try_from(*n).map_err(|_| GateError::Storage(StorageError::Overflow { key: key.to_string() }))?;
      toml_edit::value(n)
    }
    PrefValue::Bool(b) => toml_edit::value(*b),
    PrefValue::Str(s) => toml_edit::value(s.as_str()),
  })
}

fn wrong_type(key: &str, expected: &'static str) -> GateError {
  GateError::Storage(StorageError::WrongType {
    key: key.to_string(),
    expected,
  })
}

impl PreferenceStore for FilePreferenceStore {
  fn get_int(&self, key: &str) -> GateResult<Option<u64>> {
    let Some(item) = self.item(key)? else {
      return Ok(None);
    };

    if let Some(n) = item.as_integer() {
      return u64::try_from(n).map(Some).map_err(|_| wrong_type(key, "non-negative integer"));
    }

    // build numbers are sometimes stored as strings
    if let Some(s) = item.as_str() {
      return match s.trim().parse::<u64>() {
        Ok(n) => Ok(Some(n)),
        Err(_) => {
          tracing::warn!(key, value = s, "non-numeric counter value, reading as 0");
          Ok(Some(0))
        }
      };
    }

    Err(wrong_type(key, "non-negative integer"))
  }

  fn set_int(&mut self, key: &str, value: u64) -> GateResult<()> {
    let item = toml_item(key, &PrefValue::Int(value))?;
    self.mutate(&[key], |doc| doc[key] = item)
  }

  fn get_bool(&self, key: &str) -> GateResult<Option<bool>> {
    match self.item(key)? {
      None => Ok(None),
      Some(item) => item.as_bool().map(Some).ok_or_else(|| wrong_type(key, "boolean")),
    }
  }

  fn set_bool(&mut self, key: &str, value: bool) -> GateResult<()> {
    self.mutate(&[key], |doc| doc[key] = toml_edit::value(value))
  }

  fn get_string(&self, key: &str) -> GateResult<Option<String>> {
    match self.item(key)? {
      None => Ok(None),
      Some(item) => item
        .as_value()
        .and_then(Value::as_str)
        .map(|s| Some(s.to_string()))
        .ok_or_else(|| wrong_type(key, "string")),
    }
  }

  fn set_string(&mut self, key: &str, value: &str) -> GateResult<()> {
    self.mutate(&[key], |doc| doc[key] = toml_edit::value(value))
  }

  fn set_many(&mut self, entries: &[(String, PrefValue)]) -> GateResult<()> {
    let items = entries
      .iter()
      .map(|(key, value)| toml_item(key, value).map(|item| (key.as_str(), item)))
      .collect::<GateResult<Vec<_>>>()?;
    let keys: Vec<&str> = items.iter().map(|(key, _)| *key).collect();

    self.mutate(&keys, |doc| {
      for (key, item) in items {
        doc[key] = item;
      }
    })
  }
}

/// Value held by `MemoryPreferenceStore`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefValue {
  Int(u64),
  Bool(bool),
  Str(String),
}

/// In-memory preference store
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
  values: BTreeMap<String, PrefValue>,
  writes: usize,
  fail_reads: bool,
  /// Successful writes allowed before every further write fails
  write_budget: Option<usize>,
}

impl MemoryPreferenceStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Seed a value without counting it as a write
  pub fn with(mut self, key: impl Into<String>, value: PrefValue) -> Self {
    self.values.insert(key.into(), value);
    self
  }

  /// Every read fails with a storage error
  pub fn failing_reads(mut self) -> Self {
    self.fail_reads = true;
    self
  }

  /// Every write fails with a storage error
  pub fn failing_writes(mut self) -> Self {
    self.write_budget = Some(0);
    self
  }

  /// The first `n` writes succeed, every later one fails
  pub fn failing_writes_after(mut self, n: usize) -> Self {
    self.write_budget = Some(n);
    self
  }

  /// Number of successful writes so far
  pub fn writes(&self) -> usize {
    self.writes
  }

  pub fn value(&self, key: &str) -> Option<&PrefValue> {
    self.values.get(key)
  }

  fn read(&self, key: &str) -> GateResult<Option<&PrefValue>> {
    if self.fail_reads {
      return Err(GateError::Storage(StorageError::Access {
        path: PathBuf::from("<memory>"),
        reason: format!("read of '{}' refused", key),
      }));
    }
    Ok(self.values.get(key))
  }

  fn write(&mut self, key: &str, value: PrefValue) -> GateResult<()> {
    self.write_all(vec![(key.to_string(), value)])
  }

  /// One counted write; nothing is applied when it is refused
  fn write_all(&mut self, entries: Vec<(String, PrefValue)>) -> GateResult<()> {
    if self.write_budget.is_some_and(|budget| self.writes >= budget) {
      let keys: Vec<&str> = entries.iter().map(|(key, _)| key.as_str()).collect();
      return Err(GateError::Storage(StorageError::Access {
        path: PathBuf::from("<memory>"),
        reason: format!("write of '{}' refused", keys.join("', '")),
      }));
    }
    self.values.extend(entries);
    self.writes += 1;
    Ok(())
  }
}

impl PreferenceStore for MemoryPreferenceStore {
  fn get_int(&self, key: &str) -> GateResult<Option<u64>> {
    match self.read(key)? {
      None => Ok(None),
      Some(PrefValue::Int(n)) => Ok(Some(*n)),
      Some(PrefValue::Str(s)) => Ok(Some(s.trim().parse().unwrap_or(0))),
      Some(PrefValue::Bool(_)) => Err(wrong_type(key, "non-negative integer")),
    }
  }

  fn set_int(&mut self, key: &str, value: u64) -> GateResult<()> {
    self.write(key, PrefValue::Int(value))
  }

  fn get_bool(&self, key: &str) -> GateResult<Option<bool>> {
    match self.read(key)? {
      None => Ok(None),
      Some(PrefValue::Bool(b)) => Ok(Some(*b)),
      Some(_) => Err(wrong_type(key, "boolean")),
    }
  }

  fn set_bool(&mut self, key: &str, value: bool) -> GateResult<()> {
    self.write(key, PrefValue::Bool(value))
  }

  fn get_string(&self, key: &str) -> GateResult<Option<String>> {
    match self.read(key)? {
      None => Ok(None),
      Some(PrefValue::Str(s)) => Ok(Some(s.clone())),
      Some(_) => Err(wrong_type(key, "string")),
    }
  }

  fn set_string(&mut self, key: &str, value: &str) -> GateResult<()> {
    self.write(key, PrefValue::Str(value.to_string()))
  }

  fn set_many(&mut self, entries: &[(String, PrefValue)]) -> GateResult<()> {
    self.write_all(entries.to_vec())
  }
}
