use std::num::IntErrorKind;
use std::str::FromStr;
use log::debug;
use uuid::Uuid;

use crate::data::{NewNote, Note, NoteDate, NoteUpdate};
use crate::lib_constants::HYPHENED_UUID_SIZE;
use crate::query::errors::{QueryError, ValidationError};
use crate::query::model::{Envelope, EnvelopeKind, NotePayload, NoteUpdatePayload};
use crate::repository::NoteRepository;
use crate::util::StrExt;


/// Entry point for the HTTP layer: checks raw parameters, calls into the
/// repository and wraps what comes back.
pub struct NoteQueries {
    repository: Box<dyn NoteRepository>,
}

impl NoteQueries {
    pub fn new(repository: Box<dyn NoteRepository>) -> Self {
        NoteQueries { repository }
    }

    pub async fn list_all(&self) -> Result<Envelope<Vec<Note>>, QueryError> {
        Ok(Envelope::new(EnvelopeKind::List, self.repository.list_all().await?))
    }

    /// An empty `data` means there's no such note.
    pub async fn get_one(&self, id: &str) -> Result<Envelope<Vec<Note>>, QueryError> {
        let id = parse_id(id)?;
        Ok(Envelope::new(EnvelopeKind::Single, self.repository.find_by_id(id).await?))
    }

    pub async fn create(&self, payload: NotePayload) -> Result<Note, QueryError> {
        let new_note = validate_new_note(payload)
            .inspect_err(|e| debug!("rejecting note creation: {e}"))?;
        Ok(self.repository.create(new_note).await?)
    }

    pub async fn update(
        &self,
        id: &str,
        payload: NoteUpdatePayload,
    ) -> Result<Note, QueryError> {
        let id = parse_id(id)?;
        let update = validate_update(payload)
            .inspect_err(|e| debug!("rejecting update of note {id}: {e}"))?;
        Ok(self.repository.replace_by_id(id, update).await?)
    }

    pub async fn filter_by_date(
        &self,
        threshold: Option<&str>,
    ) -> Result<Envelope<Vec<Note>>, QueryError> {
        let threshold = parse_date(threshold, "date")?;
        Ok(
            Envelope::new(
                EnvelopeKind::Filtered,
                self.repository.filter_by_date_after(&threshold).await?,
            )
        )
    }

    pub async fn limit(
        &self,
        n: Option<&str>,
    ) -> Result<Envelope<Vec<Note>>, QueryError> {
        let n = parse_limit(n)?;
        Ok(
            Envelope::new(
                EnvelopeKind::Limited,
                self.repository.top_n_by_recency(n).await?,
            )
        )
    }
}

fn parse_id(id: &str) -> Result<Uuid, ValidationError> {
    Some(id)
        .filter(|id| id.len() == HYPHENED_UUID_SIZE)
        .and_then(|id| Uuid::from_str(id).ok())
        .ok_or_else(|| ValidationError::InvalidId(id.to_owned()))
}

fn parse_date(
    date: Option<&str>,
    field: &'static str,
) -> Result<NoteDate, ValidationError> {
    let date = date.ok_or(ValidationError::MissingField(field))?;
    Ok(NoteDate::from_str(date.trim())?)
}

fn parse_limit(n: Option<&str>) -> Result<usize, ValidationError> {
    let n = n.ok_or(ValidationError::MissingField("limit"))?;
    match n.trim().parse() {
        Ok(n) => Ok(n),
        // more notes than could ever be stored
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Ok(usize::MAX),
        Err(_) => Err(ValidationError::InvalidLimit(n.to_owned())),
    }
}

fn required(
    value: Option<String>,
    field: &'static str,
) -> Result<String, ValidationError> {
    value.ok_or(ValidationError::MissingField(field))
}

fn validate_new_note(payload: NotePayload) -> Result<NewNote, ValidationError> {
    let user = required(payload.user, "user")?;
    if user.is_blank() {
        return Err(ValidationError::BlankField("user"));
    }
    Ok(
        NewNote {
            user,
            date: parse_date(payload.date.as_deref(), "date")?,
            title: required(payload.title, "title")?,
            body: required(payload.body, "body")?,
        }
    )
}

fn validate_update(payload: NoteUpdatePayload) -> Result<NoteUpdate, ValidationError> {
    Ok(
        NoteUpdate {
            title: required(payload.title, "title")?,
            body: required(payload.body, "body")?,
        }
    )
}
