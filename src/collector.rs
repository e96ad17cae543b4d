//! Manifest assembly from the caption records of one entry.
//!
//! The manifest is always rebuilt from every `*.caption.json` file in the
//! directory. Both outputs are written to a temporary file first and then
//! renamed, so a failed run never leaves a half-written manifest behind.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde_json::{json, Map, Value};

use crate::error::Error;
use crate::naming::CAPTION_SUFFIX;
use crate::util::merge::deep_merge;

/// Key under which section records are listed.
const IMAGE_KEY: &str = "image";

/// Paths written by [`collect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collected {
    /// `<entry_id>.json`.
    pub manifest: PathBuf,
    /// `<entry_id>_filelist`.
    pub filelist: PathBuf,
    /// Number of caption records folded into the manifest.
    pub records: usize,
}

/// Suffixes shared by every stem.
///
/// Each file is attributed to the longest stem it starts with, so a stem
/// that happens to prefix a longer one never claims that one's files. A
/// suffix is kept only when it occurs for every stem.
#[must_use]
pub fn common_suffixes(
    stems: &BTreeSet<String>,
    files: &[String],
) -> Vec<String> {
    let mut by_length: Vec<&str> = stems.iter().map(String::as_str).collect();
    by_length.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let mut suffixes: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for file in files {
        if let Some(stem) = by_length.iter().copied().find(|s| file.starts_with(*s)) {
            let _ = suffixes
                .entry(stem)
                .or_default()
                .insert(&file[stem.len()..]);
        }
    }

    let mut per_stem = by_length.iter().map(|s| suffixes.get(s));
    let Some(Some(first)) = per_stem.next() else {
        return Vec::new();
    };
    let mut common: BTreeSet<&str> = first.clone();
    for set in per_stem {
        match set {
            Some(set) => common.retain(|s| set.contains(s)),
            None => common.clear(),
        }
    }
    common.into_iter().map(str::to_owned).collect()
}

/// JSON-pointer form of a section path.
fn pointer(path: &[String]) -> String {
    path.iter()
        .map(|p| format!("/{}", p.replace('~', "~0").replace('/', "~1")))
        .collect()
}

/// Nest `leaf` under `path`.
fn nest(path: &[String], leaf: Value) -> Value {
    path.iter()
        .rev()
        .fold(leaf, |inner, key| json!({ key.as_str(): inner }))
}

fn string_list(value: Option<&Value>) -> Option<Vec<String>> {
    value?
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(str::to_owned))
        .collect()
}

/// File one caption record into `sections`. Returns the record's stem.
fn file_record(
    sections: &mut Value,
    mut record: Map<String, Value>,
    source: &Path,
) -> Option<String> {
    let Some(path) = string_list(record.get("_section")) else {
        log::warn!("{}: no usable _section, skipped", source.display());
        return None;
    };
    let Some(stem) = record
        .get("filename")
        .and_then(Value::as_str)
        .map(str::to_owned)
    else {
        log::warn!("{}: no filename, skipped", source.display());
        return None;
    };

    let extras = record.get("_extras").cloned().unwrap_or(Value::Null);
    let leaf = if extras.is_object() {
        extras
    } else {
        Value::Object(Map::new())
    };
    deep_merge(sections, &nest(&path, leaf));

    record.retain(|key, _| !key.starts_with('_'));
    let node = if path.is_empty() {
        Some(&mut *sections)
    } else {
        sections.pointer_mut(&pointer(&path))
    };
    if let Some(Value::Object(section)) = node {
        let images = section
            .entry(IMAGE_KEY)
            .or_insert_with(|| Value::Array(Vec::new()));
        match images {
            Value::Array(list) => list.push(Value::Object(record)),
            other => *other = Value::Array(vec![Value::Object(record)]),
        }
    }
    Some(stem)
}

/// Sections and stems of every caption record for `entry_id` in `dir`.
pub fn gather(
    dir: &Path,
    entry_id: &str,
) -> Result<(Value, BTreeSet<String>, Vec<String>), Error> {
    let mut names: Vec<String> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_ok_and(|t| t.is_file()))
        .filter_map(|e| e.file_name().into_string().ok())
        .collect();
    names.sort();

    let mut sections = Value::Object(Map::new());
    let mut stems = BTreeSet::new();
    for name in names.iter().filter(|n| n.ends_with(CAPTION_SUFFIX)) {
        let path = dir.join(name);
        let value: Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
        let Value::Object(record) = value else {
            log::warn!("{}: not a JSON object, skipped", path.display());
            continue;
        };
        if record.get("_entry_id").and_then(Value::as_str) != Some(entry_id) {
            log::debug!("{}: other entry, skipped", path.display());
            continue;
        }
        if let Some(stem) = file_record(&mut sections, record, &path) {
            let _ = stems.insert(stem);
        }
    }
    Ok((sections, stems, names))
}

fn write_atomically(path: &Path, content: &str) -> Result<(), Error> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Build `<entry_id>.json` and `<entry_id>_filelist` in `dir` from the
/// caption records found there.
///
/// `last_modified` defaults to today's local date.
pub fn collect(
    dir: &Path,
    entry_id: &str,
    last_modified: Option<NaiveDate>,
) -> Result<Collected, Error> {
    let (mut sections, stems, files) = gather(dir, entry_id)?;
    let date = last_modified
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let manifest_name = format!("{entry_id}.json");
    let filelist_name = format!("{entry_id}_filelist");
    let files: Vec<String> = files
        .into_iter()
        .filter(|f| *f != manifest_name && *f != filelist_name)
        .collect();

    if let Value::Object(root) = &mut sections {
        let _ = root.insert(
            "image_suffix".to_owned(),
            json!(common_suffixes(&stems, &files)),
        );
        let _ = root.insert(
            "last_modification".to_owned(),
            json!(date.format("%Y-%m-%d").to_string()),
        );
    }
    let manifest = json!({ entry_id: sections });

    let manifest_path = dir.join(&manifest_name);
    let filelist_path = dir.join(&filelist_name);
    write_atomically(&manifest_path, &serde_json::to_string_pretty(&manifest)?)?;
    let listing: Vec<&str> = stems.iter().map(String::as_str).collect();
    write_atomically(&filelist_path, &listing.join("\n"))?;
    log::info!(
        "{entry_id}: manifest with {} records written to {}",
        stems.len(),
        manifest_path.display()
    );

    Ok(Collected {
        manifest: manifest_path,
        filelist: filelist_path,
        records: stems.len(),
    })
}
