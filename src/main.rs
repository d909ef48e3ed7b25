use log::{error, info};
use std::env;
use std::process;

use connect_four_bot::bot::Bot;
use connect_four_bot::client;
use connect_four_bot::config::Config;

#[tokio::main]
async fn main() {
    // We default to 'info' level logging. But if the `RUST_LOG` environment
    // variable is set, we keep that value instead.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    env_logger::init();

    info!("Starting Connect Four bot...");

    // Load configuration once at startup
    let mut config = Config::load_or_default();

    // Tournament hosts sometimes hand out the coordinator address at launch
    // time; CONNECT4_SERVER overrides Bot.toml when present.
    if let Ok(addr) = env::var("CONNECT4_SERVER") {
        config.connection.server_addr = addr;
    }

    let bot = Bot::new(config.clone());

    if let Err(e) = client::run(bot, &config).await {
        error!("Session ended: {}", e);
        process::exit(1);
    }
}
