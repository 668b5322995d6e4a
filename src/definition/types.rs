//! Package records loaded from a tree

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};

use crate::config::DEFINITION_FILE;
use crate::definition::labels::IGNORE;

/// Release-tracking configuration and pinned version of one package
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct Package {
    #[serde(default, deserialize_with = "scalar_string")]
    pub name: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub category: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub version: String,
    #[serde(default, deserialize_with = "scalar_map")]
    pub labels: HashMap<String, String>,
}

impl Package {
    /// Label value, treating an empty string as absent
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// `autobump.ignore: "1"`
    pub fn is_ignored(&self) -> bool {
        self.label(IGNORE) == Some("1")
    }
}

/// A package bound to its directory in the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub package: Package,
    pub path: PathBuf,
}

impl Definition {
    pub fn new(package: Package, path: impl Into<PathBuf>) -> Self {
        Self {
            package,
            path: path.into(),
        }
    }

    /// Location of the definition document
    pub fn file(&self) -> PathBuf {
        definition_file(&self.path)
    }
}

pub fn definition_file(dir: &Path) -> PathBuf {
    dir.join(DEFINITION_FILE)
}

/// A scalar kept exactly as written, so `1.10` is not read back as `1.1`
struct ScalarText(String);

impl<'de> Deserialize<'de> for ScalarText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScalarVisitor;

        impl Visitor<'_> for ScalarVisitor {
            type Value = ScalarText;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a scalar value")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ScalarText, E> {
                Ok(ScalarText(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<ScalarText, E> {
                Ok(ScalarText(v))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<ScalarText, E> {
                Ok(ScalarText(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<ScalarText, E> {
                Ok(ScalarText(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<ScalarText, E> {
                Ok(ScalarText(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<ScalarText, E> {
                Ok(ScalarText(v.to_string()))
            }
        }

        // serde_yaml hands plain scalars to `deserialize_str` untouched
        deserializer.deserialize_str(ScalarVisitor)
    }
}

fn scalar_text(value: Option<ScalarText>) -> String {
    value.map(|ScalarText(text)| text).unwrap_or_default()
}

fn scalar_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<ScalarText>::deserialize(deserializer).map(scalar_text)
}

fn scalar_map<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<HashMap<String, String>, D::Error> {
    let raw = Option::<HashMap<String, Option<ScalarText>>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(k, v)| (k, scalar_text(v)))
        .collect())
}
