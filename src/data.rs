use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod note_date;

pub use note_date::{NoteDate, NoteDateParseError};

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Note {
    pub id: Uuid,
    pub user: String,
    pub date: NoteDate,
    pub title: String,
    pub body: String,
}

/// Everything a note is created from, less the id.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewNote {
    pub user: String,
    pub date: NoteDate,
    pub title: String,
    pub body: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NoteUpdate {
    pub title: String,
    pub body: String,
}

impl Note {
    pub fn from_new(id: Uuid, new_note: NewNote) -> Self {
        Note {
            id,
            user: new_note.user,
            date: new_note.date,
            title: new_note.title,
            body: new_note.body,
        }
    }

    pub fn apply_update(&mut self, update: NoteUpdate) {
        self.title = update.title;
        self.body = update.body;
    }
}
