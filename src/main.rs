use clap::Parser;

use voicedrop::application::ports::ConfigStore;
use voicedrop::cli::{
    config_cmd, devices_cmd, merge_config, run_record, Cli, Commands, Presenter, RecordOptions,
    EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR,
};
use voicedrop::domain::config::AppConfig;
use voicedrop::domain::recording::Duration;
use voicedrop::infrastructure::XdgConfigStore;
use voicedrop::logging;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() {
    let cli = Cli::parse();
    let mut presenter = Presenter::new();

    if let Err(e) = logging::init() {
        // A broken log setup should not block recording
        presenter.warn(&format!("Logging disabled: {}", e));
    }

    let store = XdgConfigStore::new();

    let exit_code = match cli.command {
        Some(Commands::Config { action }) => {
            match config_cmd::handle_config_command(action, &store, &presenter).await {
                Ok(()) => EXIT_SUCCESS,
                Err(e) => {
                    presenter.error(&e.to_string());
                    EXIT_ERROR
                }
            }
        }
        Some(Commands::Devices) => match devices_cmd::handle_devices_command(&presenter) {
            Ok(()) => EXIT_SUCCESS,
            Err(e) => {
                presenter.error(&e);
                EXIT_ERROR
            }
        },
        None => record(cli, &store, &mut presenter).await,
    };

    std::process::exit(exit_code);
}

async fn record(cli: Cli, store: &XdgConfigStore, presenter: &mut Presenter) -> i32 {
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            presenter.warn(&format!("Ignoring config file: {}", e));
            AppConfig::empty()
        }
    };

    let cli_config = AppConfig {
        endpoint: cli.endpoint,
        max_duration: cli.max_duration,
        notify: if cli.notify { Some(true) } else { None },
        device: cli.device,
    };

    let config = merge_config(file_config, cli_config);

    let endpoint = match config.endpoint.clone() {
        Some(endpoint) => endpoint,
        None => {
            presenter.error(
                "No endpoint given. Pass one as an argument, set VOICEDROP_ENDPOINT, \
                 or run 'voicedrop config set endpoint <URL>'",
            );
            return EXIT_USAGE_ERROR;
        }
    };

    let max_duration = match config
        .max_duration
        .as_deref()
        .map(str::parse::<Duration>)
        .transpose()
    {
        Ok(parsed) => parsed.unwrap_or_else(Duration::default_max_duration),
        Err(e) => {
            presenter.error(&format!("Invalid max duration: {}", e));
            return EXIT_USAGE_ERROR;
        }
    };

    let options = RecordOptions {
        endpoint,
        max_duration,
        notify: config.notify_or_default(),
        device: config.device,
    };

    run_record(options, presenter).await
}
