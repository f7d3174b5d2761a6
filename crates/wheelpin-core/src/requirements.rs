//! Pinned requirement lines (`name==version`).
//!
//! Input is usually pip-compile output: continuation lines joined with `\`,
//! comments, and `--hash` options carrying source hashes. Only the pin (and
//! an optional environment marker) survives parsing.

use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequirementsError {
    #[error("requirement on line {line} is not pinned with `==`: {content:?}")]
    NotPinned { line: usize, content: String },

    #[error("editable requirement on line {line} has no wheel to pin: {content:?}")]
    Editable { line: usize, content: String },
}

/// pip options that carry no requirement of their own.
const SKIPPED_OPTIONS: &[&str] = &[
    "-r",
    "--requirement",
    "-c",
    "--constraint",
    "-i",
    "--index-url",
    "--extra-index-url",
    "--no-index",
    "-f",
    "--find-links",
    "--trusted-host",
    "--require-hashes",
    "--hash",
    "--pre",
    "--prefer-binary",
    "--only-binary",
    "--no-binary",
];

/// A pinned requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub name: String,
    pub version: String,
    /// Environment marker after `;`, without the separator.
    pub marker: Option<String>,
}

impl Requirement {
    /// Parse a single requirement specifier, ignoring any trailing pip options.
    pub fn parse(spec: &str) -> Option<Self> {
        let (spec, marker) = match spec.split_once(';') {
            Some((s, m)) => {
                let m = strip_options(m).trim();
                (s, (!m.is_empty()).then(|| m.to_string()))
            }
            None => (strip_options(spec), None),
        };
        let (name, version) = spec.trim().split_once("==")?;
        let name = name.trim();
        let version = version.trim();
        // `===` is arbitrary equality, not a version pin.
        if version.starts_with('=') {
            return None;
        }
        if name.is_empty() || version.is_empty() || version.contains(char::is_whitespace) {
            return None;
        }
        // Extras (`name[extra]==1.0`) don't change which wheel is needed.
        let name = name.split('[').next().unwrap_or(name).trim();
        Some(Self {
            name: name.to_string(),
            version: version.to_string(),
            marker,
        })
    }

    /// True if `dist`/`version` (as encoded in a wheel filename) satisfy this pin.
    pub fn matches(&self, dist: &str, version: &str) -> bool {
        normalize_name(dist) == normalize_name(&self.name) && version == self.version
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=={}", self.name, self.version)?;
        if let Some(m) = &self.marker {
            write!(f, "; {m}")?;
        }
        Ok(())
    }
}

/// PEP 503 name normalization: lowercase, runs of `-`, `_`, `.` collapse to `-`.
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_sep = false;
    for c in name.chars() {
        if c == '-' || c == '_' || c == '.' {
            if !prev_sep {
                out.push('-');
            }
            prev_sep = true;
        } else {
            out.push(c.to_ascii_lowercase());
            prev_sep = false;
        }
    }
    out
}

/// Cut everything from the first ` --option` onwards.
fn strip_options(s: &str) -> &str {
    match s.find(" -") {
        Some(i) => &s[..i],
        None => s,
    }
}

/// Strip a trailing comment: `#` at line start or preceded by whitespace.
fn strip_comment(line: &str) -> &str {
    if line.trim_start().starts_with('#') {
        return "";
    }
    let bytes = line.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'#' && i > 0 && bytes[i - 1].is_ascii_whitespace() {
            return &line[..i];
        }
    }
    line
}

/// Option name of a line starting with `-`: `--index-url=x` gives `--index-url`, `-rbase.txt` gives `-r`.
fn option_name(spec: &str) -> &str {
    let token = spec
        .split(|c: char| c.is_whitespace() || c == '=')
        .next()
        .unwrap_or(spec);
    if token.starts_with("--") {
        return token;
    }
    match token.char_indices().nth(2) {
        Some((i, _)) => &token[..i],
        None => token,
    }
}

/// One logical line (continuations joined, comment stripped).
fn parse_logical(spec: &str, line: usize) -> Result<Option<Requirement>, RequirementsError> {
    if spec.is_empty() {
        return Ok(None);
    }
    if spec.starts_with('-') {
        let opt = option_name(spec);
        if opt == "-e" || opt == "--editable" {
            return Err(RequirementsError::Editable {
                line,
                content: spec.to_string(),
            });
        }
        if SKIPPED_OPTIONS.contains(&opt) {
            return Ok(None);
        }
    }
    Requirement::parse(spec)
        .map(Some)
        .ok_or_else(|| RequirementsError::NotPinned {
            line,
            content: spec.to_string(),
        })
}

/// Parse requirements text into pins, in file order.
///
/// Blank lines, comments and index/constraint option lines (`-r`, `--index-url`, …)
/// are skipped. Editable installs and anything not an exact `==` pin are errors.
pub fn parse_requirements(text: &str) -> Result<Vec<Requirement>, RequirementsError> {
    let mut reqs = Vec::new();
    let mut logical = String::new();
    let mut start_line = 0;

    for (idx, raw) in text.lines().enumerate() {
        if logical.is_empty() {
            start_line = idx + 1;
        }
        let line = strip_comment(raw);
        let (body, continues) = match line.trim_end().strip_suffix('\\') {
            Some(b) => (b, true),
            None => (line, false),
        };
        logical.push_str(body.trim());
        logical.push(' ');
        if continues {
            continue;
        }

        let spec = logical.trim().to_string();
        logical.clear();
        reqs.extend(parse_logical(&spec, start_line)?);
    }

    reqs.extend(parse_logical(logical.trim(), start_line)?);

    Ok(reqs)
}
