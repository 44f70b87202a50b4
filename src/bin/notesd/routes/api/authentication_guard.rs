use async_trait::async_trait;
use log::debug;
use rocket::{Request, State};
use rocket::http::hyper::header;
use rocket::http::Status;
use rocket::outcome::try_outcome;
use rocket::request::{FromRequest, Outcome};
use crate::access_granter::AccessGranter;

/// Present only on requests carrying a known bearer token.
#[derive(Debug)]
pub struct Authenticated;

#[async_trait]
impl<'r> FromRequest<'r> for Authenticated {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let Some(auth_header) = request.headers().get_one(header::AUTHORIZATION.as_str()) else {
            debug!("no authorization header on {}", request.uri());
            return Outcome::Error((Status::Unauthorized, ()));
        };
        let access_granter = try_outcome!(
            request.guard::<&State<Box<dyn AccessGranter>>>().await
        );
        if access_granter.is_authorized(auth_header) {
            Outcome::Success(Authenticated)
        } else {
            Outcome::Error((Status::Unauthorized, ()))
        }
    }
}
