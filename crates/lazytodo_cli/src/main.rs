//! Command-line front end for the task list.
//!
//! # Responsibility
//! - Translate commands into `TaskStore` calls and print the projected view.
//! - Report infrastructure failures (config, database, writes) as errors.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use eyre::{bail, eyre, Result, WrapErr};
use lazytodo_core::db::open_db;
use lazytodo_core::view::projector::{EMPTY_VIEW_HINT, EMPTY_VIEW_TITLE};
use lazytodo_core::{
    init_logging, remaining_label, time_ago, AppConfig, Clock, ConfigOverrides, FilterMode,
    SqliteTaskStorage, SystemClock, TaskId, TaskStorage, TaskStore, ViewSettings,
};
use log::info;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::from_env(ConfigOverrides {
        db_path: cli.db.clone(),
        log_level: cli.log_level.clone(),
        log_dir: cli.log_dir.clone(),
    })?;
    if let Some(log_dir) = &config.log_dir {
        let log_dir = log_dir
            .to_str()
            .ok_or_else(|| eyre!("log dir is not valid UTF-8: {}", log_dir.display()))?;
        init_logging(config.log_level, log_dir).map_err(|err| eyre!(err))?;
    }

    if let Commands::Version = cli.command {
        println!("lazytodo_core version={}", lazytodo_core::core_version());
        return Ok(());
    }

    let conn = open_db(&config.db_path)
        .wrap_err_with(|| format!("failed to open {}", config.db_path.display()))?;
    let storage = SqliteTaskStorage::try_new(&conn)?;
    let mut store = TaskStore::with_storage(storage);
    info!("event=cli_command module=cli status=start count={}", store.len());

    run(&mut store, cli.command)?;

    if store.has_pending_write() {
        store.flush().wrap_err("failed to save tasks")?;
    }
    Ok(())
}

fn run<S: TaskStorage>(store: &mut TaskStore<S, SystemClock>, command: Commands) -> Result<()> {
    match command {
        Commands::Add { text } => match store.add(&text.join(" ")) {
            Some(task) => println!("added {}", task.id),
            None => bail!("task text must not be blank"),
        },
        Commands::List { filter, oldest } => {
            let settings = ViewSettings {
                filter,
                sort_newest: !oldest,
            };
            print_view(store, &settings);
        }
        Commands::Toggle { id } => {
            let id = resolve_id(store, &id)?;
            store.toggle(&id);
            let state = match store.get(&id) {
                Some(task) if task.done => "done",
                _ => "open",
            };
            println!("{id} is now {state}");
        }
        Commands::Remove { id } => {
            let id = resolve_id(store, &id)?;
            store.remove(&id);
            println!("removed {id}");
        }
        Commands::Edit { id, text } => {
            let id = resolve_id(store, &id)?;
            let before = store.get(&id).map(|task| task.text);
            store.update_text(&id, &text.join(" "));
            if store.get(&id).map(|task| task.text) == before {
                println!("{id} unchanged");
            } else {
                println!("updated {id}");
            }
        }
        Commands::Move { source, target } => {
            let source = resolve_id(store, &source)?;
            let target = resolve_id(store, &target)?;
            if !store.reorder(&source, &target) {
                bail!("cannot move a task in front of itself");
            }
            println!("moved {source} before {target}");
        }
        Commands::ClearCompleted => {
            let removed = store.clear_completed();
            println!("removed {removed} completed task(s)");
        }
        Commands::Dump => {
            let snapshot = store.debug_surface().items();
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Commands::Version => {}
    }
    Ok(())
}

fn print_view<S: TaskStorage>(store: &TaskStore<S, SystemClock>, settings: &ViewSettings) {
    let rows = settings.project(store.tasks());
    if rows.is_empty() {
        println!("{EMPTY_VIEW_TITLE}");
        if settings.filter == FilterMode::All {
            println!("{EMPTY_VIEW_HINT}");
        }
    }

    let now = SystemClock.now_ms();
    for task in &rows {
        let mark = if task.done { "x" } else { " " };
        println!(
            "{}  [{mark}] {}  ({})",
            short_id(&task.id),
            task.text,
            time_ago(task.created, now)
        );
    }
    println!(
        "{} | filter: {} | {}",
        remaining_label(store.remaining_count()),
        settings.filter,
        settings.sort_label()
    );
}

/// Exact id, or an id prefix matching exactly one task.
fn resolve_id<S: TaskStorage>(store: &TaskStore<S, SystemClock>, raw: &str) -> Result<TaskId> {
    let raw = raw.trim();
    let exact = TaskId::from(raw);
    if store.get(&exact).is_some() {
        return Ok(exact);
    }

    let mut matches = store
        .tasks()
        .iter()
        .filter(|task| !raw.is_empty() && task.id.as_str().starts_with(raw));
    match (matches.next(), matches.next()) {
        (Some(task), None) => Ok(task.id.clone()),
        (Some(_), Some(_)) => bail!("id prefix `{raw}` is ambiguous"),
        (None, _) => bail!("no task with id `{raw}`"),
    }
}

fn short_id(id: &TaskId) -> &str {
    let value = id.as_str();
    value.get(..8).unwrap_or(value)
}
