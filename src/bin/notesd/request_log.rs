use async_trait::async_trait;
use log::info;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::{Request, Response};

pub struct RequestLogFairing;

#[async_trait]
impl Fairing for RequestLogFairing {
    fn info(&self) -> Info {
        Info {
            name: "request log",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(
        &self,
        request: &'r Request<'_>,
        response: &mut Response<'r>,
    ) {
        info!(
            "{} {} -> {}",
            request.method(),
            request.uri(),
            response.status(),
        );
    }
}
