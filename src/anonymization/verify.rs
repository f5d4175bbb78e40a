//! Privacy verification of outbound records
//!
//! Walks the serialized record (minus its `mapping`) and reports every
//! whole-token occurrence of a declared real name. Generated text is
//! anonymized during assembly, so leaks can only come from fields that are
//! passed through verbatim, such as user-chosen story settings.

use crate::anonymization::{
    mapping::NameMapping, pattern::NamePattern, record::OutboundRecord,
};
use crate::domain::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

/// What to do when a record still contains a declared name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeakPolicy {
    /// Log a warning and store the record anyway
    #[default]
    Warn,
    /// Refuse to store the record
    Block,
}

impl std::str::FromStr for LeakPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "warn" => Ok(Self::Warn),
            "block" => Ok(Self::Block),
            _ => Err(format!("Invalid leak policy '{s}'. Must be one of: warn, block")),
        }
    }
}

/// One declared name found outside the mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrivacyLeak {
    /// JSON path of the offending field
    pub field_path: String,
    /// SHA-256 of the real name (never log plaintext names)
    pub name_hash: String,
}

/// Result of verifying one record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PrivacyReport {
    pub leaks: Vec<PrivacyLeak>,
}

impl PrivacyReport {
    /// Whether no declared name was found
    pub fn is_clean(&self) -> bool {
        self.leaks.is_empty()
    }

    /// Distinct offending field paths
    pub fn field_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.leaks.iter().map(|l| l.field_path.as_str()).collect();
        paths.sort_unstable();
        paths.dedup();
        paths
    }
}

/// Verify that `record` holds no real name outside its `mapping`
///
/// # Errors
///
/// Returns an error if the record cannot be serialized or a name cannot be
/// compiled into a matcher.
pub fn verify_record(record: &OutboundRecord, mapping: &NameMapping) -> Result<PrivacyReport> {
    let mut value = record.to_json()?;
    if let Value::Object(map) = &mut value {
        map.remove("mapping");
    }

    let patterns = mapping
        .iter()
        .map(|(name, _)| -> Result<(String, NamePattern)> {
            Ok((hash_name(name), NamePattern::compile(name)?))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut report = PrivacyReport::default();
    traverse_json(&value, "", &patterns, &mut report)?;
    Ok(report)
}

fn traverse_json(
    value: &Value,
    path: &str,
    patterns: &[(String, NamePattern)],
    report: &mut PrivacyReport,
) -> Result<()> {
    match value {
        Value::String(s) => {
            for (name_hash, pattern) in patterns {
                if pattern.is_match(s)? {
                    report.leaks.push(PrivacyLeak {
                        field_path: path.to_string(),
                        name_hash: name_hash.clone(),
                    });
                }
            }
        }
        Value::Object(map) => {
            for (key, val) in map {
                let new_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                traverse_json(val, &new_path, patterns, report)?;
            }
        }
        Value::Array(arr) => {
            for (idx, val) in arr.iter().enumerate() {
                let new_path = format!("{path}[{idx}]");
                traverse_json(val, &new_path, patterns, report)?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// Hash a real name using SHA-256
pub fn hash_name(name: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    format!("{:x}", hasher.finalize())
}
