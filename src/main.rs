mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, LoopCommand, LOOP_HELP};
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tracing_subscriber::EnvFilter;
use turfgdd::datasources::{HomeAssistantClient, WeatherSource};
use turfgdd::db::{Database, StateStore};
use turfgdd::logic::{GddCoordinator, LEASE_HEARTBEAT};
use turfgdd::models::GddSnapshot;
use turfgdd::Config;

type Coordinator = GddCoordinator<HomeAssistantClient, Database>;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Run);

    if let Commands::Init = command {
        Config::setup_interactive(cli.config.as_ref())?;
        return Ok(());
    }

    let config = if Config::exists(cli.config.as_ref()) {
        Config::load(cli.config.as_ref()).context("Failed to load configuration")?
    } else {
        println!("No configuration found.");
        Config::setup_interactive(cli.config.as_ref())?.0
    };

    if let Commands::Check = command {
        return check(&config, cli.data_dir.as_ref()).await;
    }

    let mut coord = open_coordinator(&config, cli.data_dir.as_ref())?;

    match command {
        Commands::Run => {
            coord
                .claim()
                .context("Another `turfgdd run` is already tracking this instance")?;
            let stdin = BufReader::new(tokio::io::stdin());
            let result = run(&mut coord, config.update_interval_minutes, stdin, ctrl_c()).await;
            coord.release();
            result?;
        }
        Commands::Status { json } => print_snapshot(&coord.snapshot(), json)?,
        // Handled before the coordinator is opened
        Commands::Init | Commands::Check => {}
        command => {
            let result = one_shot(&mut coord, command).await;
            coord.release();
            result?;
        }
    }

    Ok(())
}

/// Mutating subcommands. They only proceed while no `run` loop owns the instance.
async fn one_shot(coord: &mut Coordinator, command: Commands) -> Result<()> {
    coord
        .claim()
        .context("`turfgdd run` owns this instance; type the command into its stdin instead")?;

    match command {
        Commands::Tick { json } => {
            let snapshot = coord.update().await?;
            print_snapshot(&snapshot, json)?;
        }
        Commands::Reset => {
            coord.reset_all()?;
            println!("All GDD values reset.");
        }
        Commands::SetSeasonal { value } => {
            let snapshot = coord.set_seasonal_gdd(value)?;
            println!("Seasonal GDD set to {:.1}", snapshot.state.seasonal_gdd);
        }
        Commands::SetBase { value } => {
            let snapshot = coord.set_base_temperature(value)?;
            println!("Base temperature set to {:.1} °C", snapshot.base_temperature);
        }
        Commands::RecordMowing => {
            coord.record_mowing()?;
            println!("Mowing recorded.");
        }
        // Dispatched by main
        Commands::Run | Commands::Status { .. } | Commands::Init | Commands::Check => {}
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn open_coordinator(config: &Config, data_dir: Option<&PathBuf>) -> Result<Coordinator> {
    let db_path = Config::db_path(data_dir)?;
    let db = Database::open(&db_path)
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;

    if config.homeassistant.token.is_empty() {
        tracing::warn!("Home Assistant token not configured - readings will fail");
    }
    let client = HomeAssistantClient::new(config.homeassistant.clone())?;

    let mut coord = GddCoordinator::new(config, client, db);
    coord.hydrate();
    Ok(coord)
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Cannot listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

/// Scheduler loop. Holds the owner lease and is the only writer, so ticks and
/// manual commands never overlap. Returns once `shutdown` completes.
async fn run<W, S, R>(
    coord: &mut GddCoordinator<W, S>,
    interval_minutes: u64,
    input: R,
    shutdown: impl Future<Output = ()>,
) -> Result<()>
where
    W: WeatherSource,
    S: StateStore,
    R: AsyncBufRead + Unpin,
{
    // First tick fires immediately
    let mut interval = tokio::time::interval(Duration::from_secs(interval_minutes * 60));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut heartbeat = tokio::time::interval(LEASE_HEARTBEAT);
    heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tokio::pin!(shutdown);

    let mut lines = input.lines();
    let mut stdin_open = true;

    tracing::info!(instance = %coord.instance(), interval_minutes, "Starting GDD tracking");
    println!("{}", LOOP_HELP);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                run_update(coord).await;
            }
            _ = heartbeat.tick() => {
                if let Err(e) = coord.claim() {
                    tracing::error!(error = %e, "Failed to refresh owner lease");
                }
            }
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) => {
                    if !line.trim().is_empty() {
                        handle_line(coord, &line).await;
                    }
                }
                Ok(None) => {
                    tracing::debug!("stdin closed, manual commands disabled");
                    stdin_open = false;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read command");
                    stdin_open = false;
                }
            },
            _ = &mut shutdown => {
                tracing::info!("Shutting down");
                break;
            }
        }
    }

    Ok(())
}

async fn run_update<W: WeatherSource, S: StateStore>(coord: &mut GddCoordinator<W, S>) {
    match coord.update().await {
        Ok(snapshot) => print_summary(&snapshot),
        Err(e) => tracing::error!(error = %e, "GDD update failed, retrying next interval"),
    }
}

async fn handle_line<W: WeatherSource, S: StateStore>(
    coord: &mut GddCoordinator<W, S>,
    line: &str,
) {
    let command = match LoopCommand::parse(line) {
        Ok(c) => c,
        Err(msg) => {
            println!("{}", msg);
            return;
        }
    };

    match command {
        LoopCommand::Reset => match coord.reset_all() {
            Ok(_) => println!("All GDD values reset."),
            Err(e) => println!("{}", e),
        },
        LoopCommand::Mow => match coord.record_mowing() {
            Ok(_) => println!("Mowing recorded."),
            Err(e) => println!("{}", e),
        },
        LoopCommand::SetSeasonal(value) => match coord.set_seasonal_gdd(value) {
            Ok(s) => println!("Seasonal GDD set to {:.1}", s.state.seasonal_gdd),
            Err(e) => println!("{}", e),
        },
        LoopCommand::SetBase(value) => match coord.set_base_temperature(value) {
            Ok(s) => println!("Base temperature set to {:.1} °C", s.base_temperature),
            Err(e) => println!("{}", e),
        },
        LoopCommand::Tick => run_update(coord).await,
        LoopCommand::Status => print_summary(&coord.snapshot()),
        LoopCommand::Help => println!("{}", LOOP_HELP),
    }
}

async fn check(config: &Config, data_dir: Option<&PathBuf>) -> Result<()> {
    println!("Configuration OK");
    println!("  Instance:    {}", config.instance);
    println!(
        "  Base temp:   {:.1} °C ({})",
        config.calculation.base_temperature, config.calculation.method
    );
    println!("  Weather:     {}", config.homeassistant.weather_entity);

    let db_path = Config::db_path(data_dir)?;
    match Database::open(&db_path) {
        Ok(_) => println!("Database OK ({})", db_path.display()),
        Err(e) => println!("Database FAILED: {}", e),
    }

    let client = HomeAssistantClient::new(config.homeassistant.clone())?;
    match client.test_connection().await {
        Ok(true) => println!("Home Assistant: OK"),
        Ok(false) => println!("Home Assistant: rejected (check token)"),
        Err(e) => println!("Home Assistant: OFFLINE ({})", e),
    }

    Ok(())
}

fn print_snapshot(snapshot: &GddSnapshot, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
    } else {
        print_summary(snapshot);
    }
    Ok(())
}

fn fmt_temp(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.1}", v))
        .unwrap_or_else(|| "--".into())
}

fn print_summary(s: &GddSnapshot) {
    let progress = &s.seasonal_progress;
    let growth = &s.state.growth;

    println!();
    println!(
        "Seasonal GDD:  {:.1} / {:.0} ({:.1}%, {})",
        s.state.seasonal_gdd, progress.target, progress.percentage, progress.stage
    );
    println!(
        "Weekly GDD:    {:.1}{}",
        s.state.weekly_gdd,
        s.average_weekly_gdd
            .map(|a| format!(" (avg {:.1})", a))
            .unwrap_or_default()
    );
    println!(
        "Daily GDD:     {:.1} yesterday, {:.1} estimated today",
        s.state.daily_gdd, s.estimated_daily_gdd
    );
    println!(
        "Temperature:   {} °C now, {} / {} °C today ({})",
        fmt_temp(s.current_temp),
        fmt_temp(s.daily_min),
        fmt_temp(s.daily_max),
        s.data_source_label
    );
    println!(
        "Turf:          {}, {}, base {:.1} °C",
        s.turf_type, s.maintenance_level, s.base_temperature
    );
    println!(
        "Mowing:        {} ({:.1} mm over {} days, next in ~{} days)",
        s.mowing_recommendation, growth.accumulated_growth, growth.days_since_mow, s.days_to_next_mow
    );
    println!("PGR:           {}", s.pgr_recommendation);
    println!("Outlook:       {}", s.growth_forecast);

    for rec in &s.recommendations {
        if let Some(action) = &rec.suggested_action {
            println!("{} {}: {}", rec.severity.symbol(), rec.title, action);
        }
    }
}
