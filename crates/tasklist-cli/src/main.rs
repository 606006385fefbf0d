mod cli;
mod config;
mod render;
mod replay;
mod tui;

use crate::cli::ConfigCommand;
use clap::Parser;
use color_eyre::Result;
use tasklist_core::{
    clock::{SystemClock, DEFAULT_TIMESTAMP_FORMAT},
    location::{History, MemoryHistory},
};
use tasklist_view::TaskListViewModel;
use tracing::info;
use tracing_subscriber::{
    fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

type AppViewModel = TaskListViewModel<MemoryHistory, SystemClock>;

/// Entry point wiring the CLI to the view-model and its view layers.
fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = cli::Cli::parse();
    let command = cli.command.unwrap_or(cli::Command::Tui);
    init_tracing(&command);

    let config = config::load()?;
    let url = cli.url.as_deref();
    match command {
        cli::Command::Tui => {
            let vm = tui::launch(build_view_model(url, &config))?;
            println!("{}", vm.history().location());
        }
        cli::Command::List { search, json } => {
            let mut vm = build_view_model(url, &config);
            if let Some(search) = search {
                vm.set_search_text(search);
            }
            print_view(&vm, json)?;
        }
        cli::Command::Run { script, json } => {
            let body = replay::read_script(&script)?;
            let mut vm = build_view_model(url, &config);
            replay::run_script(&mut vm, &body)?;
            print_view(&vm, json)?;
        }
        cli::Command::Version => print_version(),
        cli::Command::Config(ConfigCommand::Init) => init_config(&config)?,
    }

    Ok(())
}

fn init_tracing(command: &cli::Command) {
    // Respect user-provided filters; logs go to stderr so stdout stays scriptable.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let writer = if logs_to_terminal(command) {
        BoxMakeWriter::new(std::io::stderr)
    } else {
        BoxMakeWriter::new(std::io::sink)
    };
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(writer);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

/// The TUI owns the whole terminal while it runs, so anything written to stderr
/// would land on top of the drawn frame.
fn logs_to_terminal(command: &cli::Command) -> bool {
    !matches!(command, cli::Command::Tui)
}

fn print_version() {
    println!("tasklist {}", env!("CARGO_PKG_VERSION"));
}

fn init_config(config: &config::Config) -> Result<()> {
    let path = config::write_default_if_missing(config)?;
    println!("Config initialized at {}", path.display());
    Ok(())
}

/// Mount the list: resolve the starting location and clock, then bootstrap the demo tasks.
fn build_view_model(url: Option<&str>, config: &config::Config) -> AppViewModel {
    let url = url
        .or(config.initial_url.as_deref())
        .unwrap_or("/");
    let format = config
        .timestamp_format
        .as_deref()
        .unwrap_or(DEFAULT_TIMESTAMP_FORMAT);
    info!(url, "mounting task list");

    let mut vm = TaskListViewModel::new(
        MemoryHistory::from_url(url),
        SystemClock::with_format(format),
    );
    if config.seed_demo {
        vm.seed_demo_tasks();
    }
    vm
}

fn print_view(vm: &AppViewModel, json: bool) -> Result<()> {
    if json {
        println!("{}", render::json(vm)?);
    } else {
        print!("{}", render::plain(vm)?);
    }
    Ok(())
}
