// src/main.rs - Moderate text from the command line and print the decision as JSON

use anyhow::Result;
use log::info;
use std::env;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

use automoderator::config::ModerationConfig;
use automoderator::engine::AutoModerator;

fn usage() -> ! {
    eprintln!("usage: automoderator [--config <path>] [text...]");
    eprintln!("       reads stdin when no text arguments are given");
    std::process::exit(64);
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("automoderator v{}", env!("CARGO_PKG_VERSION"));

    let mut config_path: Option<PathBuf> = None;
    let mut words: Vec<String> = Vec::new();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => match args.next() {
                Some(path) => config_path = Some(PathBuf::from(path)),
                None => usage(),
            },
            "--help" | "-h" => usage(),
            _ => words.push(arg),
        }
    }

    let config = match config_path {
        Some(path) => ModerationConfig::load(&path).await?,
        None => ModerationConfig::default(),
    };
    let engine = AutoModerator::new(config);

    // Arguments are already text; stdin is an arbitrary payload and goes
    // through the UTF-8 gate.
    let decision = if words.is_empty() {
        let mut payload = Vec::new();
        tokio::io::stdin().read_to_end(&mut payload).await?;
        engine.review_bytes(&payload)?
    } else {
        engine.review(Some(&words.join(" ")))
    };

    println!("{}", serde_json::to_string_pretty(&decision)?);
    Ok(())
}
