//! Entity descriptors: the encoded identifiers the co-change miner emits for
//! classes, methods and fields.
//!
//! A descriptor looks like
//! `<path-noise>_<ClassName>.java/[CN]/<Nested>/.../<member>(<type>,...)[/body|/parameters]`.
//! All views are derived from the raw string by a [`DescriptorParser`], which
//! owns the compiled patterns and the generics normalizer.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::adapters::naming::AngleBracketStripper;
use crate::domain::error::DescriptorError;
use crate::domain::ports::GenericsNormalizer;

/// Separator between successive levels of type nesting.
pub const NESTED_CLASS_MARKER: &str = "/[CN]/";

/// A descriptor is only recognized when it contains this marker.
pub const JAVA_FILE_MARKER: &str = ".java/";

const SUFFIX_MARKERS: [&str; 2] = ["/body", "/parameters"];

/// Raw, unnormalized entity descriptor as produced by the miner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityDescriptor(String);

impl EntityDescriptor {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityDescriptor {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for EntityDescriptor {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// Every derived view of one descriptor, ready for output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptorSummary {
    pub descriptor: String,
    pub query_string: String,
    pub classname: Option<String>,
    pub filename: Option<String>,
    pub path: Option<String>,
    pub name: String,
    pub parameters: Option<Vec<String>>,
}

/// Compiled structural patterns, built once per parser.
struct DescriptorPatterns {
    classname: Regex,
    filename: Regex,
    path: Regex,
}

impl DescriptorPatterns {
    fn compile() -> Self {
        Self {
            classname: Regex::new(r"^.+\.java/\[CN\]/([^\[]+)/").expect("classname regex"),
            filename: Regex::new(r"_([^.]+)\.java/\[CN\]/").expect("filename regex"),
            path: Regex::new(r"([^.]+)\.java/\[CN\]/").expect("path regex"),
        }
    }
}

/// Derives query strings, names and signatures from [`EntityDescriptor`]s.
///
/// Construct once and share; the parser is immutable and `Send + Sync`.
pub struct DescriptorParser {
    patterns: DescriptorPatterns,
    normalizer: Box<dyn GenericsNormalizer>,
}

impl DescriptorParser {
    /// Parser using the built-in [`AngleBracketStripper`].
    pub fn new() -> Self {
        Self::with_normalizer(Box::new(AngleBracketStripper))
    }

    /// Parser delegating generics removal to a host-supplied normalizer.
    pub fn with_normalizer(normalizer: Box<dyn GenericsNormalizer>) -> Self {
        Self {
            patterns: DescriptorPatterns::compile(),
            normalizer,
        }
    }

    /// Normalized form of the descriptor, suitable for searching.
    ///
    /// Returns an empty string when the descriptor carries no `.java/` marker.
    pub fn query_string(&self, descriptor: &EntityDescriptor) -> String {
        let mut query = descriptor.as_str().trim().to_string();
        for suffix in SUFFIX_MARKERS {
            query = query.replace(suffix, "");
        }

        let Some(marker) = query.find(JAVA_FILE_MARKER) else {
            return String::new();
        };
        let start = query[..marker].rfind('_').unwrap_or(0);
        let query = &query[start..];

        let segments: Vec<&str> = query.split(NESTED_CLASS_MARKER).collect();
        let query = match segments.as_slice() {
            [first, .., last] if segments.len() > 2 => {
                format!("{first}{NESTED_CLASS_MARKER}{last}")
            }
            _ => query.to_string(),
        };

        let query = self.normalizer.remove_generics(&query);
        abbreviate_parameter_types(&query)
    }

    /// Name of the type enclosing the member.
    pub fn classname(&self, descriptor: &EntityDescriptor) -> Result<String, DescriptorError> {
        self.query_classname(&self.query_string(descriptor))
            .ok_or_else(|| DescriptorError::NotClassScoped {
                descriptor: descriptor.to_string(),
            })
    }

    /// File name without the `.java` extension.
    pub fn filename(&self, descriptor: &EntityDescriptor) -> Option<String> {
        self.query_filename(&self.query_string(descriptor))
    }

    /// Same as [`Self::filename`] for a query string that is already normalized.
    pub fn query_filename(&self, query: &str) -> Option<String> {
        first_capture(&self.patterns.filename, query)
    }

    /// Path prefix of the raw descriptor up to the `.java` file.
    pub fn path(&self, descriptor: &EntityDescriptor) -> Option<String> {
        first_capture(&self.patterns.path, descriptor.as_str())
    }

    /// Bare member name, without enclosing types or signature.
    pub fn name(&self, descriptor: &EntityDescriptor) -> String {
        query_name(&self.query_string(descriptor)).to_string()
    }

    /// Parameter types of the member signature.
    ///
    /// `None` when there is no signature at all, an empty vector for `()`.
    pub fn parameters(&self, descriptor: &EntityDescriptor) -> Option<Vec<String>> {
        query_parameters(&self.query_string(descriptor))
    }

    /// All views at once; normalizes the descriptor a single time.
    pub fn summarize(&self, descriptor: &EntityDescriptor) -> DescriptorSummary {
        let query = self.query_string(descriptor);
        DescriptorSummary {
            descriptor: descriptor.to_string(),
            classname: self.query_classname(&query),
            filename: self.query_filename(&query),
            path: self.path(descriptor),
            name: query_name(&query).to_string(),
            parameters: query_parameters(&query),
            query_string: query,
        }
    }

    fn query_classname(&self, query: &str) -> Option<String> {
        first_capture(&self.patterns.classname, query)
    }
}

impl Default for DescriptorParser {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DescriptorParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescriptorParser").finish_non_exhaustive()
    }
}

fn first_capture(re: &Regex, haystack: &str) -> Option<String> {
    re.captures(haystack)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Text after the last `/`, cut at the first `(`.
fn query_name(query: &str) -> &str {
    let member = query.rfind('/').map_or(query, |i| &query[i + 1..]);
    member.find('(').map_or(member, |open| &member[..open])
}

fn query_parameters(query: &str) -> Option<Vec<String>> {
    let (_, params) = split_signature(query)?;
    if params.is_empty() {
        return Some(Vec::new());
    }
    Some(params.split(',').map(String::from).collect())
}

/// Split `head(params)trailer` into `head` and `params`.
///
/// The parameter list runs from the first `(` to the last `)`; an unterminated
/// list runs to the end of the string.
fn split_signature(query: &str) -> Option<(&str, &str)> {
    let open = query.find('(')?;
    let close = query
        .rfind(')')
        .filter(|&close| close > open)
        .unwrap_or(query.len());
    Some((&query[..open], &query[open + 1..close]))
}

/// `foo(java.lang.String,int)` → `foo(String,int)`
fn abbreviate_parameter_types(query: &str) -> String {
    let Some((head, params)) = split_signature(query) else {
        return query.to_string();
    };
    let params: Vec<&str> = params
        .split(',')
        .map(|param| {
            let param = param.trim();
            param.rsplit('.').next().unwrap_or(param)
        })
        .collect();
    format!("{head}({})", params.join(","))
}
