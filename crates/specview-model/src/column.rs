#![deny(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use crate::ColumnSpecParseError;

/// Separator between the display name and the type tag of a column spec.
pub const SPEC_SEPARATOR: &str = " ;";

/// Semantic type carried by a spec column header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnType {
    /// List of values: categorical, compared by exact value.
    Lov,
    /// Decimal number, optionally followed by a unit (`"24 V"`).
    Number,
    /// Interval written as `"min-max"`, optionally followed by a unit.
    Range,
    /// Boolean flag.
    Logical,
    /// Free text, compared by exact value.
    Text,
}

impl ColumnType {
    pub const ALL: [ColumnType; 5] = [
        ColumnType::Lov,
        ColumnType::Number,
        ColumnType::Range,
        ColumnType::Logical,
        ColumnType::Text,
    ];

    /// The tag as it appears after the separator.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Lov => "LOV",
            ColumnType::Number => "number",
            ColumnType::Range => "range",
            ColumnType::Logical => "logical",
            ColumnType::Text => "text",
        }
    }

    /// Matches a type tag exactly. Tags are case-sensitive so that
    /// re-serializing a parsed spec yields the source string.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed column reference such as `"Output type ;LOV"`.
///
/// The string form is also the header under which catalog rows carry the
/// column, so it is parsed once here and rendered back via [`fmt::Display`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnSpec {
    name: String,
    column_type: ColumnType,
}

impl ColumnSpec {
    pub fn new(
        name: impl Into<String>,
        column_type: ColumnType,
    ) -> Result<Self, ColumnSpecParseError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ColumnSpecParseError::EmptyName {
                spec: format!("{name}{SPEC_SEPARATOR}{column_type}"),
            });
        }
        Ok(Self { name, column_type })
    }

    /// Parses `"<Name> ;<type>"`, splitting on the last separator.
    pub fn parse(spec: &str) -> Result<Self, ColumnSpecParseError> {
        let Some((name, tag)) = spec.rsplit_once(SPEC_SEPARATOR) else {
            return Err(ColumnSpecParseError::MissingSeparator {
                spec: spec.to_string(),
            });
        };
        if name.trim().is_empty() {
            return Err(ColumnSpecParseError::EmptyName {
                spec: spec.to_string(),
            });
        }
        let column_type =
            ColumnType::from_tag(tag).ok_or_else(|| ColumnSpecParseError::UnknownType {
                spec: spec.to_string(),
                found: tag.to_string(),
            })?;
        Ok(Self {
            name: name.to_string(),
            column_type,
        })
    }

    /// `None` is the explicit "no column" value and is not an error.
    pub fn parse_optional(spec: Option<&str>) -> Result<Option<Self>, ColumnSpecParseError> {
        spec.map(Self::parse).transpose()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    /// Header key used to look the column up in a catalog row.
    pub fn header(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.name, SPEC_SEPARATOR, self.column_type)
    }
}

impl FromStr for ColumnSpec {
    type Err = ColumnSpecParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for ColumnSpec {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for ColumnSpec {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A column named either by a typed spec or by a bare row field such as `"Name"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnRef {
    Spec(ColumnSpec),
    Plain(String),
}

impl ColumnRef {
    /// A string containing the separator must be a valid spec; anything else
    /// is an unqualified field name.
    pub fn parse(value: &str) -> Result<Self, ColumnSpecParseError> {
        if value.contains(SPEC_SEPARATOR) {
            return ColumnSpec::parse(value).map(ColumnRef::Spec);
        }
        if value.trim().is_empty() {
            return Err(ColumnSpecParseError::EmptyName {
                spec: value.to_string(),
            });
        }
        Ok(ColumnRef::Plain(value.to_string()))
    }

    pub fn parse_optional(value: Option<&str>) -> Result<Option<Self>, ColumnSpecParseError> {
        value.map(Self::parse).transpose()
    }

    pub fn header(&self) -> String {
        self.to_string()
    }

    /// Display name without the type tag.
    pub fn name(&self) -> &str {
        match self {
            ColumnRef::Spec(spec) => spec.name(),
            ColumnRef::Plain(name) => name,
        }
    }

    pub fn as_spec(&self) -> Option<&ColumnSpec> {
        match self {
            ColumnRef::Spec(spec) => Some(spec),
            ColumnRef::Plain(_) => None,
        }
    }
}

impl From<ColumnSpec> for ColumnRef {
    fn from(spec: ColumnSpec) -> Self {
        ColumnRef::Spec(spec)
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRef::Spec(spec) => spec.fmt(f),
            ColumnRef::Plain(name) => f.write_str(name),
        }
    }
}

impl FromStr for ColumnRef {
    type Err = ColumnSpecParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for ColumnRef {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for ColumnRef {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
