mod errors;
mod internal;
mod model;

pub use errors::{QueryError, ValidationError};
pub use internal::NoteQueries;
pub use model::{Envelope, EnvelopeKind, ErrorEnvelope, NotePayload, NoteUpdatePayload};
