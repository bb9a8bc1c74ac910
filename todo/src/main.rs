//! Interactive to-do list.
//!
//! Reads one command per line from stdin and repaints the list on stdout after
//! every dispatch. Logs go to stderr; set `RUST_LOG` to change the level.

use anyhow::Context;
use statefold_core::environment::SequentialIdGenerator;
use statefold_runtime::StoreConfig;
use std::io::BufRead;
use std::rc::Rc;
use todo_app::command::HELP;
use todo_app::{Command, TodoView, ViewConfig, WriterSurface, create_store_with_config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_app=info,statefold_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    statefold_runtime::metrics::register_metrics();

    let store = Rc::new(create_store_with_config(
        StoreConfig::default().with_name("todos"),
    ));
    let view = Rc::new(TodoView::new(
        Rc::clone(&store),
        Box::new(SequentialIdGenerator::new()),
        Box::new(WriterSurface::new(std::io::stdout())),
        ViewConfig::default(),
    ));

    let subscription = view.mount().context("failed to paint the initial frame")?;
    println!("{HELP}");

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(todo_app::CommandError::Empty) => continue,
            Err(error) => {
                tracing::warn!(%error, "Ignoring input");
                eprintln!("{error}");
                continue;
            }
        };

        let result = match command {
            Command::Add(text) => view.add_todo(text).map(|id| {
                tracing::info!(%id, "Added todo");
            }),
            Command::Toggle(id) => view.toggle_todo(id),
            Command::Filter(filter) => view.set_filter(filter),
            Command::Dispatch(action) => view.dispatch(action),
            Command::Help => {
                println!("{HELP}");
                Ok(())
            }
            Command::Quit => break,
        };

        if let Err(error) = result {
            tracing::error!(%error, "Command failed");
            eprintln!("{error}");
        }
    }

    subscription.unsubscribe();
    let state = store.get_state();
    tracing::info!(
        todos = state.count(),
        completed = state.completed_count(),
        "Goodbye"
    );

    Ok(())
}
