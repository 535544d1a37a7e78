use clap::Parser;
use fruit_snake_common::config::{ConfigManager, ConfigSerializer, FileContentConfigProvider, YamlConfigSerializer};
use fruit_snake_common::games::snake::{
    run_game_loop, GameCoordinator, GameSettings, HistoryEntry, SessionCommand, SessionOptions,
};
use fruit_snake_common::{log, logger};
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(name = "fruit_snake_runner", about = "Runs a headless fruit snake game")]
struct Args {
    /// YAML settings file; defaults are used when it does not exist.
    #[arg(long, default_value = "fruit_snake.yaml")]
    config: String,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    max_ticks: Option<u64>,

    #[arg(long)]
    use_log_prefix: bool,

    /// Print the final snapshot as YAML.
    #[arg(long)]
    dump_state: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Runner".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager: ConfigManager<FileContentConfigProvider, GameSettings> =
        ConfigManager::from_yaml_file(&args.config);
    let mut settings = config_manager.get_config()?;
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    log!("Loaded settings from {}: {:?}", args.config, settings);

    let mut coordinator = GameCoordinator::from_settings(&settings);
    let mut last_score = 0;
    coordinator.subscribe(move |state| {
        if state.score != last_score {
            last_score = state.score;
            log!("Score {} with length {}", state.score, state.snake.len());
        }
    });

    let mut options = SessionOptions::from(&settings);
    options.max_ticks = args.max_ticks;

    let (command_tx, command_rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log!("Shutdown signal received");
            let _ = command_tx.send(SessionCommand::Stop);
        }
    });

    let summary = run_game_loop(coordinator, options, command_rx).await;

    let derived_events = summary
        .history
        .iter()
        .filter(|entry| matches!(entry, HistoryEntry::Derived(_)))
        .count();
    log!(
        "Finished after {} ticks: score {}, length {}, game over {}, {} recent derived events",
        summary.ticks,
        summary.final_state.score,
        summary.final_state.snake.len(),
        summary.final_state.game_over,
        derived_events
    );

    if args.dump_state {
        let yaml = YamlConfigSerializer::new().serialize(summary.final_state.as_ref())?;
        println!("{}", yaml);
    }

    Ok(())
}
