//! Sheet names derived from source identifiers
//!
//! A sheet name starts as the source identifier with the prefix shared by all
//! sources and the file extension removed. It is then made safe for the
//! workbook ([`sanitize`]) and finally made unique ([`build_sheet_names`]).

use std::collections::{HashMap, HashSet};

use csv2xls_core::MAX_SHEET_NAME_LEN;
use tracing::warn;

use crate::error::{Error, Result};
use crate::options::NameRules;

/// Name used when nothing usable is left of an identifier
const FALLBACK_NAME: &str = "sheet";

/// Replace forbidden characters with `_` and cap the length.
///
/// Replacements of non-silent characters and truncations are reported as
/// warnings; neither is an error.
pub fn sanitize(raw: &str, rules: &NameRules) -> String {
    let mut name = raw.to_string();
    for &c in &rules.forbidden {
        if !name.contains(c) {
            continue;
        }
        if !rules.silent.contains(&c) {
            warn!("Sheet names cannot contain '{}', replacing in {}", c, name);
        }
        name = name.replace(c, "_");
    }

    if name.chars().count() > rules.max_len {
        let trimmed: String = name.chars().take(rules.max_len).collect();
        warn!("Sheet name too long. Trimming {} to {}", name, trimmed);
        name = trimmed;
    }
    name
}

/// Longest common prefix of all identifiers, on character boundaries.
pub fn common_prefix<S: AsRef<str>>(sources: &[S]) -> &str {
    let Some(first) = sources.first().map(AsRef::as_ref) else {
        return "";
    };

    let mut end = first.len();
    for other in &sources[1..] {
        let other = other.as_ref();
        end = first[..end]
            .char_indices()
            .zip(other.chars())
            .find(|((_, a), b)| a != b)
            .map(|((i, _), _)| i)
            .unwrap_or_else(|| end.min(other.len()));
    }
    &first[..end]
}

/// Remove the extension of the last path component.
///
/// A leading dot (as in `.hidden`) is not an extension.
pub fn trim_extension(name: &str) -> &str {
    let base_start = name.rfind(['/', '\\']).map(|i| i + 1).unwrap_or(0);
    let base = &name[base_start..];
    let dots = base.len() - base.trim_start_matches('.').len();
    match base[dots..].rfind('.') {
        Some(i) => &name[..base_start + dots + i],
        None => name,
    }
}

/// Sheet name chosen for each source position, in input order.
///
/// A source listed twice gets one entry (and one sheet) per occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetNameAssignment {
    entries: Vec<(String, String)>,
}

impl SheetNameAssignment {
    /// Sheet name assigned to the first occurrence of `source`
    pub fn get(&self, source: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(s, _)| s == source)
            .map(|(_, name)| name.as_str())
    }

    /// `(source, sheet name)` pairs in input order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(s, n)| (s.as_str(), n.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pairs ordered by sheet name, ignoring case
    pub fn sorted_by_sheet_name(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<(&str, &str)> = self.iter().collect();
        pairs.sort_by_cached_key(|(_, name)| name.to_lowercase());
        pairs
    }
}

/// Derive one unique sheet name per source.
///
/// Candidate names that occur more than once (ignoring case) are all renamed
/// to `name_1`, `name_2`, ... in input order. A suffix that would hit another
/// existing name is skipped. Repeated sources are named per position, so
/// `x.csv x.csv` yields `x_1` and `x_2`.
pub fn build_sheet_names<S: AsRef<str>>(
    sources: &[S],
    keep_prefix: bool,
    rules: &NameRules,
) -> Result<SheetNameAssignment> {
    if sources.is_empty() {
        return Err(Error::NoInputs);
    }

    // Longer names would not fit a sheet tab once suffixed
    let rules = &NameRules {
        max_len: rules.max_len.min(MAX_SHEET_NAME_LEN),
        ..rules.clone()
    };

    let prefix = if keep_prefix {
        ""
    } else {
        let prefix = common_prefix(sources);
        // A prefix covering a whole identifier would leave it nameless
        if prefix == sources[0].as_ref() {
            ""
        } else {
            prefix
        }
    };

    let candidates: Vec<String> = sources
        .iter()
        .map(|source| candidate_name(source.as_ref(), prefix, rules))
        .collect();

    let mut counts: HashMap<String, usize> = HashMap::with_capacity(candidates.len());
    for name in &candidates {
        *counts.entry(name.to_lowercase()).or_default() += 1;
    }

    let mut taken: HashSet<String> = counts.keys().cloned().collect();
    let mut next_suffix: HashMap<String, usize> = HashMap::new();
    let mut entries = Vec::with_capacity(sources.len());

    for (source, name) in sources.iter().zip(candidates) {
        let key = name.to_lowercase();
        if counts[&key] == 1 {
            entries.push((source.as_ref().to_string(), name));
            continue;
        }

        let k = next_suffix.entry(key).or_insert(1);
        let renamed = loop {
            let attempt = with_suffix(&name, *k);
            *k += 1;
            if taken.insert(attempt.to_lowercase()) {
                break attempt;
            }
        };
        warn!(
            "To avoid duplicated sheet names, renaming {} to {}",
            name, renamed
        );
        entries.push((source.as_ref().to_string(), renamed));
    }

    Ok(SheetNameAssignment { entries })
}

fn candidate_name(source: &str, prefix: &str, rules: &NameRules) -> String {
    let trimmed = source.strip_prefix(prefix).unwrap_or(source);
    let name = sanitize(trim_extension(trimmed), rules);
    if !name.is_empty() {
        return name;
    }

    let name = sanitize(trim_extension(source), rules);
    if !name.is_empty() {
        return name;
    }
    FALLBACK_NAME.to_string()
}

/// `name_k`, shortening `name` when the result would not fit a sheet tab
fn with_suffix(name: &str, k: usize) -> String {
    let suffix = format!("_{k}");
    let room = MAX_SHEET_NAME_LEN.saturating_sub(suffix.len());
    let base: String = name.chars().take(room).collect();
    format!("{base}{suffix}")
}
