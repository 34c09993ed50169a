use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::graph::EdgeKind;

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d{4})").expect("valid year regex"));

/// Sort key used for persons without a birth date.
pub const UNKNOWN_BIRTH_KEY: &str = "9999-12-31";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[serde(alias = "m")]
    Male,
    #[serde(alias = "f", alias = "w")]
    Female,
    #[default]
    #[serde(other)]
    Unspecified,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_date: Option<String>,
    #[serde(default)]
    pub is_deceased: bool,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Person {
    pub fn new(id: impl Into<String>, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Self::default()
        }
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_birth_date(mut self, date: impl Into<String>) -> Self {
        self.birth_date = Some(date.into());
        self
    }

    pub fn with_death_date(mut self, date: impl Into<String>) -> Self {
        self.death_date = Some(date.into());
        self.is_deceased = true;
        self
    }

    /// Birth date, with empty strings treated as unknown.
    pub fn birth_date(&self) -> Option<&str> {
        self.birth_date.as_deref().map(str::trim).filter(|d| !d.is_empty())
    }

    pub fn birth_year(&self) -> Option<i32> {
        self.birth_date().and_then(parse_year)
    }

    pub fn birth_sort_key(&self) -> &str {
        self.birth_date().unwrap_or(UNKNOWN_BIRTH_KEY)
    }

    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim();
        if name.is_empty() {
            self.id.clone()
        } else {
            name.to_string()
        }
    }
}

/// Leading four-digit year of an ISO-like date string (`1931`, `1931-04`, `1931-04-12`).
pub fn parse_year(date: &str) -> Option<i32> {
    YEAR_RE
        .captures(date)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    /// `from` is a parent of `to`.
    ParentChild,
    Spouse,
    Sibling,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub from_id: String,
    pub to_id: String,
    #[serde(rename = "type")]
    pub kind: RelationshipKind,
}

impl Relationship {
    pub fn new(from: impl Into<String>, to: impl Into<String>, kind: RelationshipKind) -> Self {
        Self {
            id: None,
            from_id: from.into(),
            to_id: to.into(),
            kind,
        }
    }

    pub fn parent_child(parent: impl Into<String>, child: impl Into<String>) -> Self {
        Self::new(parent, child, RelationshipKind::ParentChild)
    }

    pub fn spouse(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self::new(a, b, RelationshipKind::Spouse)
    }

    pub fn sibling(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self::new(a, b, RelationshipKind::Sibling)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Stable identifier, synthesised from the endpoints when the store gave none.
    pub fn edge_id(&self) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => format!("{}-{}", self.from_id, self.to_id),
        }
    }

    pub fn involves(&self, a: &str, b: &str) -> bool {
        (self.from_id == a && self.to_id == b) || (self.from_id == b && self.to_id == a)
    }

    /// Resolves this edge relative to `perspective`: the kind of relative the
    /// other endpoint is, and its id. `None` when `perspective` is not an endpoint.
    pub fn view_from(&self, perspective: &str) -> Option<(EdgeKind, &str)> {
        let (other, outgoing) = if self.from_id == perspective {
            (self.to_id.as_str(), true)
        } else if self.to_id == perspective {
            (self.from_id.as_str(), false)
        } else {
            return None;
        };
        let kind = match (self.kind, outgoing) {
            (RelationshipKind::ParentChild, true) => EdgeKind::Child,
            (RelationshipKind::ParentChild, false) => EdgeKind::Parent,
            (RelationshipKind::Spouse, _) => EdgeKind::Spouse,
            (RelationshipKind::Sibling, _) => EdgeKind::Sibling,
        };
        Some((kind, other))
    }
}
