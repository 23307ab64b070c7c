//! `wpctl status` report parsing
//!
//! Turns the human-oriented tree printed by `wpctl status` into a
//! [`ParsedReport`]: sections (`Audio`, `Video`, `Settings`) holding named
//! categories (`Sinks`, `Sources`, ...) holding numbered entries.
//!
//! The format has no machine-readable mode, so each line is classified by a
//! small ordered set of matchers (section header, category header, entry
//! line). Anything that matches none of them is decoration and is skipped.
//! Parsing never fails: malformed input yields an empty or partial report.
//!
//! ```text
//! Audio
//!  ├─ Sinks:
//!  │  *   50. Built-in Audio Analog Stereo        [vol: 0.40]
//!  │      51. HDMI / DisplayPort                  [vol: 1.00]
//!  │
//!  └─ Streams:
//! ```

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::{debug, trace};

// ============================================================================
// Constants
// ============================================================================

/// Top-level section names printed on their own line
pub const SECTION_NAMES: [&str; 3] = ["Audio", "Video", "Settings"];

/// Section holding the audio sinks
pub const AUDIO_SECTION: &str = "Audio";

/// Category holding the audio sinks
pub const SINKS_CATEGORY: &str = "Sinks";

/// Category whose lines are `index. value` pairs rather than selectable entries
pub const DEFAULT_NODE_NAMES_CATEGORY: &str = "Default Configured Node Names";

/// Categories whose numbered lines are recorded
pub const RECOGNIZED_CATEGORIES: [&str; 7] = [
    "Sinks",
    "Sources",
    "Devices",
    "Sink endpoints",
    "Source endpoints",
    "Streams",
    DEFAULT_NODE_NAMES_CATEGORY,
];

/// Marker placed before the id of the active entry
const CURRENT_MARKER: char = '*';

/// Tree-drawing characters trimmed from both ends of an entry line
const TREE_DECORATION: [char; 4] = ['│', '├', '└', '─'];

static CATEGORY_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[├└]─\s*([\w\s]+?)\s*:").expect("category header pattern is valid")
});

static ENTRY_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.\s*(.*)$").expect("entry line pattern is valid"));

// ============================================================================
// Report Model
// ============================================================================

/// One numbered line of a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub id: u32,
    /// Text after the id, with the marker and tree characters removed
    pub label: String,
    pub is_current: bool,
}

impl Entry {
    /// Label without a trailing bracketed annotation such as `[vol: 0.40]`
    #[must_use]
    pub fn display_name(&self) -> &str {
        let label = self.label.trim_end();
        if label.ends_with(']')
            && let Some(open) = label.rfind('[')
        {
            let name = label[..open].trim_end();
            if !name.is_empty() {
                return name;
            }
        }
        label
    }
}

/// A named group of entries inside a section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: String,
    pub entries: BTreeMap<u32, Entry>,
    pub current_id: Option<u32>,
    /// Free-text values keyed by index (only for "Default Configured Node Names")
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub values: BTreeMap<u32, String>,
}

impl Category {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// The entry carrying the current marker, if any
    #[must_use]
    pub fn current(&self) -> Option<&Entry> {
        self.current_id.and_then(|id| self.entries.get(&id))
    }

    fn record(&mut self, line: EntryLine<'_>) {
        if self.name == DEFAULT_NODE_NAMES_CATEGORY {
            self.values.insert(line.id, line.label.to_string());
            return;
        }

        if self.entries.contains_key(&line.id) {
            debug!("Duplicate id {} in '{}', keeping the later line", line.id, self.name);
        }

        if line.is_current {
            if let Some(previous) = self.current_id
                && previous != line.id
            {
                debug!(
                    "Second current marker in '{}': {} replaces {}",
                    self.name, line.id, previous
                );
                if let Some(entry) = self.entries.get_mut(&previous) {
                    entry.is_current = false;
                }
            }
            self.current_id = Some(line.id);
        } else if self.current_id == Some(line.id) {
            // Unmarked duplicate overwrote the marked entry
            self.current_id = None;
        }

        self.entries.insert(
            line.id,
            Entry {
                id: line.id,
                label: line.label.to_string(),
                is_current: line.is_current,
            },
        );
    }
}

/// Top-level grouping such as `Audio`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Section {
    pub name: String,
    pub categories: BTreeMap<String, Category>,
}

/// Structured form of one `wpctl status` report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedReport {
    pub sections: BTreeMap<String, Section>,
    /// Categories that appeared before any section header
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub unsectioned: BTreeMap<String, Category>,
}

impl ParsedReport {
    /// Look up a category by section and category name
    #[must_use]
    pub fn category(&self, section: &str, category: &str) -> Option<&Category> {
        self.sections.get(section)?.categories.get(category)
    }

    /// `Audio` → `Sinks`, if the report has it
    #[must_use]
    pub fn sinks(&self) -> Option<&Category> {
        self.category(AUDIO_SECTION, SINKS_CATEGORY)
    }

    /// Values of `Settings` → `Default Configured Node Names`
    #[must_use]
    pub fn default_node_names(&self) -> Option<&BTreeMap<u32, String>> {
        self.category("Settings", DEFAULT_NODE_NAMES_CATEGORY)
            .map(|c| &c.values)
    }

    /// True when no section or category was recognized
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.unsectioned.is_empty()
    }

    fn category_mut(&mut self, section: Option<&str>, category: &str) -> &mut Category {
        let categories = match section {
            Some(name) => {
                &mut self
                    .sections
                    .entry(name.to_string())
                    .or_insert_with(|| Section {
                        name: name.to_string(),
                        categories: BTreeMap::new(),
                    })
                    .categories
            }
            None => &mut self.unsectioned,
        };
        categories
            .entry(category.to_string())
            .or_insert_with(|| Category::new(category))
    }
}

// ============================================================================
// Line Matchers
// ============================================================================

/// A numbered line after marker detection and trimming
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryLine<'a> {
    pub id: u32,
    pub label: &'a str,
    pub is_current: bool,
}

/// Classification of one non-blank report line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Section(&'a str),
    Category(&'a str),
    Entry(EntryLine<'a>),
}

/// Match a section header line (`Audio`, `Video` or `Settings` alone)
#[must_use]
pub fn match_section(line: &str) -> Option<&str> {
    let name = line.trim();
    SECTION_NAMES.iter().copied().find(|s| *s == name)
}

/// Match a category header line such as ` ├─ Sinks:`
#[must_use]
pub fn match_category(line: &str) -> Option<&str> {
    CATEGORY_HEADER
        .captures(line.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|name| !name.is_empty())
}

/// Remove the current marker when it precedes the id
///
/// Returns the line without the marker and whether it was present. A `*`
/// that only appears inside the label does not count.
#[must_use]
pub fn strip_current_marker(line: &str) -> (String, bool) {
    let first_digit = line.find(|c: char| c.is_ascii_digit()).unwrap_or(line.len());
    match line[..first_digit].find(CURRENT_MARKER) {
        Some(pos) => {
            let mut stripped = String::with_capacity(line.len());
            stripped.push_str(&line[..pos]);
            stripped.push_str(&line[pos + CURRENT_MARKER.len_utf8()..]);
            (stripped, true)
        }
        None => (line.to_string(), false),
    }
}

/// Split `50. Built-in Audio` into id and label
///
/// Tree-drawing characters and whitespace are trimmed from both ends first.
/// Ids that do not fit in `u32` are rejected.
#[must_use]
pub fn match_entry_body(line: &str) -> Option<(u32, &str)> {
    let body = line.trim_matches(|c: char| c.is_whitespace() || TREE_DECORATION.contains(&c));
    let caps = ENTRY_LINE.captures(body)?;
    let id = caps.get(1)?.as_str().parse::<u32>().ok()?;
    let label = caps.get(2).map_or("", |m| m.as_str().trim());
    Some((id, label))
}

/// Classify a line, trying section, category and entry matchers in that order
///
/// The entry label borrows from `scratch`, which receives the line with the
/// current marker removed.
fn classify<'a>(line: &'a str, scratch: &'a mut String) -> Option<Line<'a>> {
    if let Some(name) = match_section(line) {
        return Some(Line::Section(name));
    }
    if let Some(name) = match_category(line) {
        return Some(Line::Category(name));
    }
    let (stripped, is_current) = strip_current_marker(line);
    *scratch = stripped;
    match_entry_body(scratch).map(|(id, label)| {
        Line::Entry(EntryLine {
            id,
            label,
            is_current,
        })
    })
}

// ============================================================================
// Parser
// ============================================================================

/// Where the parser is in the tree
#[derive(Debug, Default)]
struct ParseState {
    section: Option<String>,
    category: Option<String>,
}

impl ParseState {
    fn in_recognized_category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|c| RECOGNIZED_CATEGORIES.contains(c))
    }
}

/// Parse the output of `wpctl status`
///
/// Never fails: lines that cannot be classified are skipped.
#[must_use]
pub fn parse(raw: &str) -> ParsedReport {
    let mut report = ParsedReport::default();
    let mut state = ParseState::default();
    let mut scratch = String::new();

    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match classify(line, &mut scratch) {
            Some(Line::Section(name)) => {
                trace!("Section: {}", name);
                state.section = Some(name.to_string());
            }
            Some(Line::Category(name)) => {
                trace!("Category: {}", name);
                state.category = Some(name.to_string());
                if RECOGNIZED_CATEGORIES.contains(&name) {
                    report.category_mut(state.section.as_deref(), name);
                }
            }
            Some(Line::Entry(entry)) => {
                if let Some(category) = state.in_recognized_category() {
                    report
                        .category_mut(state.section.as_deref(), category)
                        .record(entry);
                }
            }
            None => trace!("Skipped line: {}", line),
        }
    }

    debug!(
        "Parsed report: {} sections, {} unsectioned categories",
        report.sections.len(),
        report.unsectioned.len()
    );
    report
}
