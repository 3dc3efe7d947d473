use std::{sync::mpsc, thread, time::Duration};

use clap::Parser;
use egui::{Pos2, Vec2};
use log::error;

use roundel::board::{AppConfig, BoardApp};
use roundel::status::producer::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_S, TflStatusProducer};
use roundel::status::{RefreshTrigger, StatusOutput, collect_status};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Seconds between automatic refreshes (overrides the config file)
    #[arg(short, long)]
    refresh_secs: Option<u64>,

    /// Line-status endpoint to poll
    #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// HTTP timeout for one status request, in seconds
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_S)]
    timeout_secs: u64,
}

fn main() {
    colog::init();

    let args = Args::parse();
    ctrlc::set_handler(move || {
        println!("Exiting...");
        std::process::exit(0);
    })
    .expect("Could not set Ctrl-C handler");

    let mut app_config = AppConfig::from_local_file().unwrap_or_default();
    if let Some(secs) = args.refresh_secs {
        app_config.refresh_period_s = secs;
    }

    let (status_tx, status_rx) = mpsc::channel::<StatusOutput>();
    let (trigger_tx, trigger_rx) = mpsc::channel::<RefreshTrigger>();

    let producer = TflStatusProducer::new(args.endpoint, Duration::from_secs(args.timeout_secs));
    let refresh_period = app_config.refresh_period();
    thread::spawn(move || {
        if let Err(e) = collect_status(producer, status_tx, trigger_rx, refresh_period) {
            error!("status collector stopped: {}", e);
        }
    });

    let mut native_options = eframe::NativeOptions::default();
    native_options.viewport = native_options
        .viewport
        .with_title("Roundel")
        .with_inner_size(Vec2::from(app_config.window_size.clone()))
        .with_position(Pos2::from(app_config.window_position.clone()));

    eframe::run_native(
        "Roundel",
        native_options,
        Box::new(|cc| Ok(Box::new(BoardApp::new(status_rx, trigger_tx, app_config, cc)))),
    )
    .expect("could not start app");
}
