//! The flat object store behind a project.pbxproj file.
//!
//! Every object in the project lives in a single dictionary keyed by its
//! identifier. Objects point at each other through those identifiers only, so
//! this is the one place where the shape of the raw data is checked; everything
//! above works with typed entities.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{Error, Result};

pub type Dictionary = BTreeMap<String, Value>;

/// A property list value.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
  String(String),
  Integer(i64),
  Real(f64),
  Boolean(bool),
  Data(Vec<u8>),
  Array(Vec<Value>),
  Dictionary(Dictionary)
}

impl Value {
  pub fn kind(&self) -> &'static str {
    match self {
      Value::String(_)     => "string",
      Value::Integer(_)    => "integer",
      Value::Real(_)       => "real",
      Value::Boolean(_)    => "boolean",
      Value::Data(_)       => "data",
      Value::Array(_)      => "array",
      Value::Dictionary(_) => "dictionary"
    }
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      Value::String(s) => Some(s),
      _                => None
    }
  }

  pub fn as_dictionary(&self) -> Option<&Dictionary> {
    match self {
      Value::Dictionary(d) => Some(d),
      _                    => None
    }
  }
}

/// A single object from the store, along with its identifier for error reporting.
#[derive(Clone, Copy, Debug)]
pub struct Record<'a> {
  pub id: &'a str,
  fields: &'a Dictionary
}

impl<'a> Record<'a> {
  pub fn new(id: &'a str, fields: &'a Dictionary) -> Self {
    Record { id, fields }
  }

  pub fn contains(&self, key: &str) -> bool {
    self.fields.contains_key(key)
  }

  fn get(&self, key: &str) -> Result<&'a Value> {
    self.fields.get(key).ok_or_else(|| Error::KeyNotFound {
      id:  self.id.to_string(),
      key: key.to_string()
    })
  }

  fn mismatch(&self, key: &str, expected: &'static str, found: &Value) -> Error {
    Error::TypeMismatch {
      id:    self.id.to_string(),
      key:   key.to_string(),
      found: found.kind(),
      expected
    }
  }

  pub fn isa(&self) -> Result<&'a str> {
    self.string("isa")
  }

  pub fn string(&self, key: &str) -> Result<&'a str> {
    let v = self.get(key)?;
    v.as_str().ok_or_else(|| self.mismatch(key, "string", v))
  }

  pub fn identifier_list(&self, key: &str) -> Result<Vec<&'a str>> {
    match self.get(key)? {
      Value::Array(items) => items.iter()
        .map(|x| x.as_str().ok_or_else(|| self.mismatch(key, "array of strings", x)))
        .collect(),
      v => Err(self.mismatch(key, "array", v))
    }
  }

  pub fn dictionary(&self, key: &str) -> Result<&'a Dictionary> {
    let v = self.get(key)?;
    v.as_dictionary().ok_or_else(|| self.mismatch(key, "dictionary", v))
  }

  /// Like `string`, but an absent key is `None` rather than an error.
  pub fn optional_string(&self, key: &str) -> Result<Option<&'a str>> {
    match self.contains(key) {
      true  => self.string(key).map(Some),
      false => Ok(None)
    }
  }

  pub fn optional_identifier_list(&self, key: &str) -> Result<Option<Vec<&'a str>>> {
    match self.contains(key) {
      true  => self.identifier_list(key).map(Some),
      false => Ok(None)
    }
  }
}

/// Immutable mapping from object identifiers to their records.
#[derive(Debug)]
pub struct Objects {
  root:    String,
  objects: Dictionary
}

impl Objects {
  pub fn new(root: impl Into<String>, objects: Dictionary) -> Self {
    Objects { root: root.into(), objects }
  }

  /// Extracts the object table and root object from a parsed project document.
  pub fn from_document(doc: Value) -> Result<Self> {
    let mut top = match doc {
      Value::Dictionary(d) => d,
      v => return Err(Error::TypeMismatch {
        id:       "<document>".to_string(),
        key:      "<root>".to_string(),
        expected: "dictionary",
        found:    v.kind()
      })
    };

    let root = {
      let r = Record::new("<document>", &top);
      r.string("rootObject")?.to_string()
    };

    let objects = match top.remove("objects") {
      Some(Value::Dictionary(d)) => d,
      Some(v) => return Err(Error::TypeMismatch {
        id:       "<document>".to_string(),
        key:      "objects".to_string(),
        expected: "dictionary",
        found:    v.kind()
      }),
      None => return Err(Error::KeyNotFound {
        id:  "<document>".to_string(),
        key: "objects".to_string()
      })
    };

    Ok(Objects { root, objects })
  }

  pub fn root_id(&self) -> &str {
    &self.root
  }

  pub fn len(&self) -> usize {
    self.objects.len()
  }

  pub fn is_empty(&self) -> bool {
    self.objects.is_empty()
  }

  pub fn object<'a>(&'a self, id: &str) -> Result<Record<'a>> {
    match self.objects.get_key_value(id) {
      Some((k, Value::Dictionary(d))) => Ok(Record::new(k, d)),
      Some((_, v)) => Err(Error::TypeMismatch {
        id:       id.to_string(),
        key:      "<object>".to_string(),
        expected: "dictionary",
        found:    v.kind()
      }),
      None => Err(Error::NotFound(id.to_string()))
    }
  }

  /// Iterates over every well-formed record, in identifier order.
  pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
    self.objects.iter().filter_map(|(id, v)| v.as_dictionary().map(|d| Record::new(id, d)))
  }
}
