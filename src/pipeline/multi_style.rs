//! Removal of shifts that ran more than one style on the same machine
//!
//! A shift is identified by its (date, shift period, machine) triple.
//! Runtime cannot be attributed to a single style when a shift mixes
//! several, so every row of such a shift is dropped. Missing styles do not
//! count towards the number of distinct styles, and missing key values
//! group together.

use crate::config::CleaningConfig;
use crate::error::Result;
use polars::prelude::*;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// (date, shift period, machine) rendered as text
pub type ShiftKey = (Option<String>, Option<String>, Option<String>);

/// Drop every row of each shift group that has more than one distinct style
pub fn drop_multi_style_shifts(df: DataFrame, config: &CleaningConfig) -> Result<DataFrame> {
    let keys = shift_keys(&df, config)?;
    let styles = text_values(df.column(&config.columns().style)?)?;
    let styles_per_shift = distinct_styles(&keys, &styles);

    let offending = styles_per_shift.values().filter(|s| s.len() > 1).count();
    if offending == 0 {
        return Ok(df);
    }
    debug!("{} shift groups ran more than one style", offending);

    let keep: BooleanChunked = keys
        .iter()
        .map(|key| {
            styles_per_shift
                .get(key)
                .is_none_or(|styles| styles.len() <= 1)
        })
        .collect();

    Ok(df.filter(&keep)?)
}

/// Shift groups with more than one style, with their styles sorted
pub fn multi_style_groups(
    df: &DataFrame,
    config: &CleaningConfig,
) -> Result<Vec<(ShiftKey, Vec<String>)>> {
    let keys = shift_keys(df, config)?;
    let styles = text_values(df.column(&config.columns().style)?)?;

    let mut groups: Vec<(ShiftKey, Vec<String>)> = distinct_styles(&keys, &styles)
        .into_iter()
        .filter(|(_, styles)| styles.len() > 1)
        .map(|(key, styles)| {
            let mut styles: Vec<String> = styles.into_iter().map(str::to_string).collect();
            styles.sort();
            (key.clone(), styles)
        })
        .collect();
    groups.sort();
    Ok(groups)
}

fn distinct_styles<'a>(
    keys: &'a [ShiftKey],
    styles: &'a [Option<String>],
) -> HashMap<&'a ShiftKey, HashSet<&'a str>> {
    let mut per_shift: HashMap<&ShiftKey, HashSet<&str>> = HashMap::new();
    for (key, style) in keys.iter().zip(styles) {
        let entry = per_shift.entry(key).or_default();
        if let Some(style) = style {
            entry.insert(style.as_str());
        }
    }
    per_shift
}

fn shift_keys(df: &DataFrame, config: &CleaningConfig) -> Result<Vec<ShiftKey>> {
    let columns = config.columns();
    let dates = text_values(df.column(&columns.date)?)?;
    let shifts = text_values(df.column(&columns.shift)?)?;
    let machines = text_values(df.column(&columns.machine)?)?;

    Ok(dates
        .into_iter()
        .zip(shifts)
        .zip(machines)
        .map(|((date, shift), machine)| (date, shift, machine))
        .collect())
}

fn text_values(column: &Column) -> Result<Vec<Option<String>>> {
    let text = column.cast(&DataType::String)?;
    Ok(text
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect())
}
