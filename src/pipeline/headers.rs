//! Header normalization and required-column validation

use crate::config::{CleaningConfig, normalize_header};
use crate::error::{CleanError, Result};
use polars::prelude::*;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Rename raw export headers to their canonical names
///
/// Headers are matched against the rename map after line endings are
/// unified and surrounding whitespace trimmed. Headers with no entry in the
/// map keep their original text.
pub fn normalize_headers(mut df: DataFrame, config: &CleaningConfig) -> Result<DataFrame> {
    let original: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let mut present: HashSet<String> = original.iter().cloned().collect();

    for name in &original {
        let Some(target) = config.rename_map().get(&normalize_header(name)) else {
            continue;
        };
        if target == name {
            continue;
        }
        if present.contains(target) {
            warn!(
                "Not renaming {:?} to {:?}: a column with that name already exists",
                name, target
            );
            continue;
        }

        debug!("Renaming column {:?} -> {:?}", name, target);
        df.rename(name, target.as_str().into())?;
        present.remove(name);
        present.insert(target.clone());
    }

    Ok(df)
}

/// Fail with `MissingColumns` unless every canonical column is present
pub fn validate_required_columns(df: &DataFrame, config: &CleaningConfig) -> Result<()> {
    let present: HashSet<&str> = df
        .get_column_names()
        .iter()
        .map(|name| name.as_str())
        .collect();

    let mut missing: Vec<String> = config
        .columns()
        .required()
        .iter()
        .filter(|name| !present.contains(*name))
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    missing.sort();
    Err(CleanError::MissingColumns { columns: missing })
}
