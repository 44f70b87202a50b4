use crate::access_granter::{AccessGranter, ProductionAccessGranter};
use crate::routes::ApiRocketBuildExt;
use async_trait::async_trait;
use log::{error, info, warn};
use notesd::config::app_config::AppConfig;
use notesd::query::NoteQueries;
use notesd::repository::ProductionNoteRepository;
use notesd::storage::JsonNoteStore;
use rocket::fairing::{Fairing, Info};
use rocket::{Build, Rocket};

pub struct AppSetupFairing;

macro_rules! ok_or_bail {
    ($rocket:ident, $expr:expr, |$e:ident| $error_logger:expr) => ({
        match $expr {
            std::result::Result::Ok(ok) => ok,
            std::result::Result::Err(e) => {
                let $e = e;
                $error_logger;
                return std::result::Result::Err($rocket);
            },
        }
    });
}

#[async_trait]
impl Fairing for AppSetupFairing {
    fn info(&self) -> Info {
        use rocket::fairing::Kind;
        Info {
            name: "app setup",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(
        &self,
        rocket: Rocket<Build>,
    ) -> rocket::fairing::Result {
        let config: AppConfig = ok_or_bail!(
            rocket,
            rocket.figment().extract(),
            |e| {
                for e in e {
                    error!("{e}");
                }
                info!("finishing due to a config parse error");
            }
        );

        let store = ok_or_bail!(
            rocket,
            JsonNoteStore::new(&config).await,
            |e| error!("note store initialization failed: {e}")
        );
        info!("keeping notes in \"{}\"", store.path().display());

        if config.auth_tokens.is_empty() {
            warn!("no auth tokens configured, guarded endpoints will refuse every request");
        }
        let access_granter: Box<dyn AccessGranter> = Box::new(
            ProductionAccessGranter::new(config.auth_tokens.clone())
        );

        let queries = NoteQueries::new(
            Box::new(ProductionNoteRepository::new(store))
        );

        Ok(
            rocket
                .manage(queries)
                .manage(access_granter)
                .manage(config)
                .install_notes_api()
        )
    }
}
