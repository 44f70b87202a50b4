mod authentication_guard;
mod errors;


use authentication_guard::Authenticated;
use errors::ApiError;
use notesd::data::Note;
use notesd::query::{Envelope, ErrorEnvelope, NotePayload, NoteQueries, NoteUpdatePayload, QueryError};
use rocket::http::Status;
use rocket::response::content::RawText;
use rocket::response::status::Created;
use rocket::serde::json::Json;
use rocket::{catch, catchers, get, post, put, routes, Build, Request, Rocket, Route, State};
use crate::app_constants::API_PREFIX;

type ApiResult<T> = Result<Json<T>, ApiError>;

#[get("/version")]
fn version() -> RawText<&'static str> {
    RawText("1")
}

#[get("/notes")]
async fn list_notes(queries: &State<NoteQueries>) -> ApiResult<Envelope<Vec<Note>>> {
    Ok(Json(queries.list_all().await?))
}

#[post("/notes", data = "<payload>")]
async fn create_note(
    _auth: Authenticated,
    queries: &State<NoteQueries>,
    payload: Json<NotePayload>,
) -> Result<Created<Json<Note>>, ApiError> {
    let note = queries.create(payload.into_inner()).await?;
    Ok(Created::new(format!("{API_PREFIX}/notes/{}", note.id)).body(Json(note)))
}

#[get("/notes/<id>")]
async fn get_note(
    id: &str,
    queries: &State<NoteQueries>,
) -> ApiResult<Envelope<Vec<Note>>> {
    let envelope = queries.get_one(id).await?;
    if envelope.data.is_empty() {
        return Err(QueryError::NotFound.into());
    }
    Ok(Json(envelope))
}

#[put("/notes/<id>", data = "<payload>")]
async fn update_note(
    id: &str,
    _auth: Authenticated,
    queries: &State<NoteQueries>,
    payload: Json<NoteUpdatePayload>,
) -> ApiResult<Envelope<Note>> {
    let note = queries.update(id, payload.into_inner()).await?;
    Ok(Json(Envelope::plain(note)))
}

#[get("/notes/date?<date>")]
async fn filter_notes_by_date(
    date: Option<&str>,
    _auth: Authenticated,
    queries: &State<NoteQueries>,
) -> ApiResult<Envelope<Vec<Note>>> {
    Ok(Json(queries.filter_by_date(date).await?))
}

#[get("/notes/limit?<limit>")]
async fn limit_notes(
    limit: Option<&str>,
    _auth: Authenticated,
    queries: &State<NoteQueries>,
) -> ApiResult<Envelope<Vec<Note>>> {
    Ok(Json(queries.limit(limit).await?))
}

#[catch(default)]
fn default_catcher(status: Status, _request: &Request) -> (Status, Json<ErrorEnvelope>) {
    let reason = status.reason().unwrap_or("request failed");
    (status, Json(ErrorEnvelope::new(reason)))
}

pub fn api_routes() -> Vec<Route> {
    routes![
        version,
        list_notes,
        create_note,
        get_note,
        update_note,
        filter_notes_by_date,
        limit_notes,
    ]
}

pub trait ApiRocketBuildExt {
    fn install_notes_api(self) -> Self;
}

impl ApiRocketBuildExt for Rocket<Build> {
    fn install_notes_api(self) -> Self {
        self
            .mount(API_PREFIX, api_routes())
            .register("/", catchers![default_catcher])
    }
}
