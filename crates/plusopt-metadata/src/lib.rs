//! Shared data model for plusopt.
//!
//! These types carry no parsing logic. They are used for:
//! - describing the program (`ProgramInfo`) for help/version rendering
//! - declaring an option set in JSON (`OptionSchema`) instead of in code
//! - reporting the state of every option after a parse (`ParseReport`)

use serde::{Deserialize, Serialize};

/// Schema format understood by this crate.
pub const SCHEMA_FORMAT_VERSION: u32 = 1;

/// Version assigned by the entry wrapper when a program does not set one.
pub const DEFAULT_PROGRAM_VERSION: &str = "0.0.1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ProgramInfo {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl ProgramInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// The four option kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionKind {
    Flag,
    SingleArg,
    MultiArg,
    Counter,
}

impl OptionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flag => "flag",
            Self::SingleArg => "single-arg",
            Self::MultiArg => "multi-arg",
            Self::Counter => "counter",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OptionDecl {
    pub kind: OptionKind,
    pub short: char,
    pub long: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub help: String,
}

impl OptionDecl {
    pub fn new(kind: OptionKind, short: char, long: impl Into<String>) -> Self {
        Self {
            kind,
            short,
            long: long.into(),
            help: String::new(),
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }
}

/// A declarative option set, usually loaded from a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OptionSchema {
    #[serde(default = "default_format_version")]
    pub format_version: u32,
    #[serde(default)]
    pub program: ProgramInfo,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionDecl>,
}

fn default_format_version() -> u32 {
    SCHEMA_FORMAT_VERSION
}

impl Default for OptionSchema {
    fn default() -> Self {
        Self {
            format_version: SCHEMA_FORMAT_VERSION,
            program: ProgramInfo::default(),
            options: Vec::new(),
        }
    }
}

impl OptionSchema {
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

/// Current state of one option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionValue {
    Passed(bool),
    Value(String),
    Values(Vec<String>),
    Count(i64),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OptionReport {
    pub kind: OptionKind,
    /// `None` when the short key has since been bound to another option.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<char>,
    pub long: String,
    pub value: OptionValue,
}

/// Snapshot of a parser after one or more parse calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ParseReport {
    #[serde(default)]
    pub options: Vec<OptionReport>,
    #[serde(default)]
    pub rest: Vec<String>,
}

impl ParseReport {
    pub fn option(&self, long: &str) -> Option<&OptionReport> {
        self.options.iter().find(|o| o.long == long)
    }
}
