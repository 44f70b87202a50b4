use std::fmt::{Display, Formatter};
use std::str::FromStr;
use serde::de::Error;
use serde::de::Unexpected::Str;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};

/// A note timestamp: the text it was given as, and the instant it means.
///
/// Accepts RFC 3339, an offsetless `YYYY-MM-DDTHH:MM:SS[.fff]` (`T` or a space
/// between date and time) taken as UTC,
/// or a bare `YYYY-MM-DD` taken as midnight UTC. The text is what gets
/// serialized back, comparisons go by [`NoteDate::instant`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NoteDate {
    text: String,
    instant: OffsetDateTime,
}

#[derive(Debug, Error)]
#[error("\"{0}\" is not a valid date")]
pub struct NoteDateParseError(pub String);

impl NoteDate {
    pub fn instant(&self) -> OffsetDateTime {
        self.instant
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_after(&self, other: &NoteDate) -> bool {
        self.instant > other.instant
    }
}

impl FromStr for NoteDate {
    type Err = NoteDateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let instant = parse_instant(s)
            .ok_or_else(|| NoteDateParseError(s.to_owned()))?;
        Ok(
            NoteDate {
                text: s.to_owned(),
                instant,
            }
        )
    }
}

fn parse_instant(s: &str) -> Option<OffsetDateTime> {
    if let Ok(instant) = OffsetDateTime::parse(s, &Rfc3339) {
        return Some(instant);
    }
    let datetime_format = format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
    );
    if let Ok(datetime) = PrimitiveDateTime::parse(s, datetime_format) {
        return Some(datetime.assume_utc());
    }
    let spaced_datetime_format = format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]]"
    );
    if let Ok(datetime) = PrimitiveDateTime::parse(s, spaced_datetime_format) {
        return Some(datetime.assume_utc());
    }
    let date_format = format_description!("[year]-[month]-[day]");
    Date::parse(s, date_format)
        .ok()
        .map(|date| PrimitiveDateTime::new(date, Time::MIDNIGHT).assume_utc())
}

impl Display for NoteDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for NoteDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for NoteDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Visitor;
        impl<'de> serde::de::Visitor<'de> for Visitor {
            type Value = NoteDate;

            fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
                formatter.write_str("string containing a date or a timestamp")
            }

            fn visit_str<E>(self, v: &str) -> Result<NoteDate, E>
            where
                E: Error
            {
                NoteDate::from_str(v)
                    .map_err(|_| Error::invalid_value(Str(v), &self))
            }
        }

        deserializer.deserialize_str(Visitor)
    }
}
