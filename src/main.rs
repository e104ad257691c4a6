//! Remote Services - terminal host for the vehicle remote services demo
//! 
//! Reads user actions from stdin, prints every rendered frame to stdout and
//! logs to stderr.

use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use tracing::{info, warn};

use remote_services::{
    config::Config,
    ui::{Flow, Frame, Navigator, UserAction, HELP},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so stdout carries only frames
    tracing_subscriber::fmt()
        .with_env_filter(format!("remote_services={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting remote-services v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: startup={}min, request_delay={}ms, tick={}s, error_display={}ms",
        config.startup_minutes,
        config.request_delay_ms,
        config.tick_seconds,
        config.error_display_ms
    );
    if config.simulate_failure {
        warn!("Every start request will fail");
    }

    let (frames_tx, mut frames_rx) = mpsc::unbounded_channel();
    let mut navigator = Navigator::new(config.screen_settings(), frames_tx);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", HELP);

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            Some(frame) = frames_rx.recv() => print_frame(&frame, config.json)?,
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("Input closed");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<UserAction>() {
                    Ok(action) => match navigator.handle(action) {
                        Flow::Continue => {}
                        Flow::Help => println!("{}", HELP),
                        Flow::Quit => break,
                    },
                    Err(e) => warn!("{}", e),
                }
            }
            _ = &mut shutdown => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    drop(navigator);
    while let Ok(frame) = frames_rx.try_recv() {
        print_frame(&frame, config.json)?;
    }
    info!("Shutdown complete");
    Ok(())
}

fn print_frame(frame: &Frame, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", frame.to_json()?);
    } else {
        println!("{}", frame);
    }
    Ok(())
}
