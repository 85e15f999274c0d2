//! Addressed messages exchanged between units.

use std::collections::BTreeMap;
use std::fmt;

use sos_core::{Location, PatientId};

/// Why a message was sent.  Decides which inbound queue it lands in.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Purpose {
    /// Asks the recipient for information.
    RequestInfo,
    /// Asks the recipient to do something.
    RequestAction,
    /// Answers an earlier request.
    Response,
    /// Unsolicited information.
    Inform,
}

impl Purpose {
    /// `RequestInfo` and `RequestAction` create obligations for the
    /// recipient's passive phase; the rest are informational.
    #[inline]
    pub fn is_request(self) -> bool {
        matches!(self, Purpose::RequestInfo | Purpose::RequestAction)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Purpose::RequestInfo   => "request-info",
            Purpose::RequestAction => "request-action",
            Purpose::Response      => "response",
            Purpose::Inform        => "inform",
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named payload field.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum FieldKey {
    /// The sender's (or requested) current location.
    Location,
    /// The most recently discovered patient.
    Discovered,
}

impl FieldKey {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKey::Location   => "Location",
            FieldKey::Discovered => "Discovered",
        }
    }
}

/// Payload value.  Requests carry [`FieldValue::Requested`] placeholders
/// under the keys they ask about.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum FieldValue {
    Requested,
    Location(Location),
    Discovered(Option<PatientId>),
}

/// An addressed payload routed by the world.
///
/// `receiver` is matched as a name *prefix*: `"Rescue"` reaches
/// `Rescue1`, `Rescue2`, … .  `location`, when set, further restricts
/// delivery to recipients currently standing on that cell.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Message {
    pub name:     String,
    pub sender:   String,
    pub receiver: String,
    pub purpose:  Purpose,
    pub location: Option<Location>,
    pub data:     BTreeMap<FieldKey, FieldValue>,
}

impl Message {
    pub fn new(sender: impl Into<String>, receiver: impl Into<String>, purpose: Purpose) -> Self {
        Self {
            name:     String::new(),
            sender:   sender.into(),
            receiver: receiver.into(),
            purpose,
            location: None,
            data:     BTreeMap::new(),
        }
    }

    /// Human-readable label used in logs.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Restrict delivery to recipients located at `location`.
    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with(mut self, key: FieldKey, value: FieldValue) -> Self {
        self.data.insert(key, value);
        self
    }

    /// Convenience for requests: add `key` with a `Requested` placeholder.
    pub fn requesting(self, key: FieldKey) -> Self {
        self.with(key, FieldValue::Requested)
    }

    #[inline]
    pub fn has(&self, key: FieldKey) -> bool {
        self.data.contains_key(&key)
    }

    #[inline]
    pub fn get(&self, key: FieldKey) -> Option<&FieldValue> {
        self.data.get(&key)
    }

    /// `true` if `name` is addressed by this message's receiver prefix.
    #[inline]
    pub fn addresses(&self, name: &str) -> bool {
        name.starts_with(self.receiver.as_str())
    }
}
