use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Body of a create request. Every field is optional here so that a missing
/// one is reported as a validation error rather than a decoding failure.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct NotePayload {
    pub user: Option<String>,
    pub date: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct NoteUpdatePayload {
    pub title: Option<String>,
    pub body: Option<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EnvelopeKind {
    List,
    Single,
    Filtered,
    Limited,
}

impl EnvelopeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvelopeKind::List => "list",
            EnvelopeKind::Single => "single",
            EnvelopeKind::Filtered => "filtered",
            EnvelopeKind::Limited => "limited",
        }
    }
}

/// `{"success": true, "<kind>": true, "data": ...}`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Envelope<T> {
    pub kind: Option<EnvelopeKind>,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(kind: EnvelopeKind, data: T) -> Self {
        Envelope {
            kind: Some(kind),
            data,
        }
    }

    pub fn plain(data: T) -> Self {
        Envelope {
            kind: None,
            data,
        }
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("success", &true)?;
        if let Some(kind) = self.kind {
            map.serialize_entry(kind.as_str(), &true)?;
        }
        map.serialize_entry("data", &self.data)?;
        map.end()
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ErrorEnvelope {
    success: bool,
    pub error: String,
}

impl ErrorEnvelope {
    pub fn new(error: impl ToString) -> Self {
        ErrorEnvelope {
            success: false,
            error: error.to_string(),
        }
    }
}
