//! Order submission entity.
//!
//! [`OrderSubmission`] is the snapshot a client edits field by field and
//! sends once it passes validation. [`OrderRequest`] is what the server
//! receives: every field is optional so that presence can be checked
//! explicitly before the request is turned into an [`Order`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// One of the four inputs of the order form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderField {
    Name,
    Phone,
    Email,
    Comment,
}

impl OrderField {
    /// All fields in form order.
    pub const ALL: [OrderField; 4] = [
        OrderField::Name,
        OrderField::Phone,
        OrderField::Email,
        OrderField::Comment,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderField::Name => "name",
            OrderField::Phone => "phone",
            OrderField::Email => "email",
            OrderField::Comment => "comment",
        }
    }
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| CoreError::UnknownField(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Client-side snapshot
// ---------------------------------------------------------------------------

/// Field values held by the order form.
///
/// An empty `comment` means the submitter left it out and is not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

impl OrderSubmission {
    pub fn get(&self, field: OrderField) -> &str {
        match field {
            OrderField::Name => &self.name,
            OrderField::Phone => &self.phone,
            OrderField::Email => &self.email,
            OrderField::Comment => &self.comment,
        }
    }

    /// Replace a field value. Returns `true` if the value actually changed.
    pub fn set(&mut self, field: OrderField, value: impl Into<String>) -> bool {
        let value = value.into();
        let slot = match field {
            OrderField::Name => &mut self.name,
            OrderField::Phone => &mut self.phone,
            OrderField::Email => &mut self.email,
            OrderField::Comment => &mut self.comment,
        };
        if *slot == value {
            return false;
        }
        *slot = value;
        true
    }

    pub fn is_empty(&self) -> bool {
        OrderField::ALL.iter().all(|f| self.get(*f).is_empty())
    }
}

// ---------------------------------------------------------------------------
// Server-side payload
// ---------------------------------------------------------------------------

/// Raw `POST /api/order` body. Unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Which required fields carry a non-empty value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldPresence {
    pub name: bool,
    pub phone: bool,
    pub email: bool,
}

impl FieldPresence {
    pub const NONE: FieldPresence = FieldPresence {
        name: false,
        phone: false,
        email: false,
    };

    pub fn all_present(&self) -> bool {
        self.name && self.phone && self.email
    }
}

/// An order that passed the server's presence check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub comment: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl OrderRequest {
    /// Presence only: whitespace counts as a value here.
    pub fn presence(&self) -> FieldPresence {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        FieldPresence {
            name: present(&self.name),
            phone: present(&self.phone),
            email: present(&self.email),
        }
    }

    /// Convert into an [`Order`], or return the presence map when a required
    /// field is missing.
    pub fn into_order(self) -> Result<Order, FieldPresence> {
        let presence = self.presence();
        match (
            non_empty(self.name),
            non_empty(self.phone),
            non_empty(self.email),
        ) {
            (Some(name), Some(phone), Some(email)) => Ok(Order {
                name,
                phone,
                email,
                comment: non_empty(self.comment),
            }),
            _ => Err(presence),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
