mod cli;
pub mod app_constants;
mod routes;
pub mod access_granter;
mod app_setup;
mod request_log;

use crate::cli::CliConfig;
use app_setup::AppSetupFairing;
use clap::{crate_name, Parser};
use figment::Figment;
use log::info;
use notesd::config::figment::FigmentExt;
use notesd::error_exit;
use notesd::logging::init_logging;
use request_log::RequestLogFairing;
use rocket::{Build, Rocket};

fn main() {
    init_logging();

    info!("{} starting up", crate_name!());

    let cli_config = CliConfig::parse();
    if !cli_config.config_file.exists() {
        error_exit!(
            "configuration file at {} does not exist",
            cli_config.config_file.display()
        )
    }
    let figment = Figment::from(rocket::Config::default())
        .setup_app_config(cli_config.config_file);

    let result = rocket::execute(build_rocket(figment).launch());
    if let Err(e) = result {
        error_exit!("failed to launch rocket: {}", e);
    }
}

fn build_rocket(figment: Figment) -> Rocket<Build> {
    rocket::custom(figment)
        .attach(AppSetupFairing)
        .attach(RequestLogFairing)
}
