use log::error;
use notesd::query::{ErrorEnvelope, QueryError};
use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::{Request, Response};

#[derive(Debug)]
pub struct ApiError {
    status: Status,
    envelope: ErrorEnvelope,
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        let status = match &err {
            QueryError::Validation(_) => Status::BadRequest,
            QueryError::NotFound => Status::NotFound,
            QueryError::IdCollision | QueryError::StoreUnavailable(_) => {
                error!("request failed: {err}");
                Status::InternalServerError
            },
        };
        ApiError {
            status,
            envelope: ErrorEnvelope::new(&err),
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        Response::build_from(Json(self.envelope).respond_to(request)?)
            .status(self.status)
            .ok()
    }
}
