//! Subcommands and their execution.
//!
//! Commands that change the list go through `TodoPage`, the same path the
//! rendered page uses: mount, run the action, report the settled state.
//! Read-only lookups and rename talk to `TodosApi` directly.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Subcommand;
use todo_core::{
    PageOptions, Settled, Title, TodoClient, TodoPage, TodosApi, Transport, UpdateTodo,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::output::Output;

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List todos, newest first
    List {
        /// Fetch a specific page instead of the first one
        #[arg(long)]
        page: Option<u32>,
    },
    /// Show one todo
    Show { id: Uuid },
    /// Add a todo
    Add { title: String },
    /// Flip a todo between open and done
    Toggle { id: Uuid },
    /// Duplicate a todo
    Copy { id: Uuid },
    /// Delete a todo
    Delete { id: Uuid },
    /// Change a todo's title
    Rename { id: Uuid, title: String },
    /// Render the page as HTML after loading the list
    Render {
        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// Everything a command needs besides its own arguments.
pub struct Session<T> {
    pub client: TodoClient,
    pub transport: T,
    pub options: PageOptions,
    pub output: Output,
}

/// Runs `command` and returns what should be printed.
pub fn execute<T: Transport>(command: Commands, session: Session<T>) -> Result<String> {
    let Session {
        client,
        transport,
        options,
        output,
    } = session;
    debug!(?command, base_url = client.base_url(), "executing");

    match command {
        Commands::List { page: Some(number) } => {
            let api = TodosApi::new(client, transport);
            let page = api
                .list_paginated(Some(number))
                .map_err(|e| anyhow!(e.message()))
                .with_context(|| format!("failed to load page {number}"))?;
            output.page(&page, number)
        }
        Commands::List { page: None } => {
            let mut page = mounted(client, transport, options)?;
            let listing = output.list(&page.snapshot());
            page.unmount();
            listing
        }
        Commands::Show { id } => {
            let api = TodosApi::new(client, transport);
            let todo = api.get(id).map_err(|e| anyhow!(e.message()))?;
            output.todo(&todo)
        }
        Commands::Add { title } => {
            let mut page = mounted(client, transport, options)?;
            page.type_title(&title);
            match page.submit() {
                Some(Settled::Added(todo)) => {
                    info!(id = %todo.id, "added");
                    output.todo(&todo)
                }
                Some(Settled::AddFailed(err)) => {
                    let shown = page.form().error().unwrap_or_default().to_string();
                    Err(anyhow!(err.message()).context(shown))
                }
                Some(other) => bail!("unexpected outcome: {other:?}"),
                None => bail!(
                    "{}",
                    page.form().error().unwrap_or("add was not submitted")
                ),
            }
        }
        Commands::Toggle { id } => {
            let mut page = mounted(client, transport, options)?;
            match page.toggle(id) {
                Settled::Toggled(todo) => output.todo(&todo),
                other => Err(mutation_error(other)),
            }
        }
        Commands::Copy { id } => {
            let mut page = mounted(client, transport, options)?;
            match page.copy(id) {
                Settled::Copied(todo) => output.todo(&todo),
                other => Err(mutation_error(other)),
            }
        }
        Commands::Delete { id } => {
            let mut page = mounted(client, transport, options)?;
            match page.delete(id) {
                Settled::Deleted(id) => Ok(format!("Deleted {id}")),
                other => Err(mutation_error(other)),
            }
        }
        Commands::Rename { id, title } => {
            let title = Title::parse(&title)?;
            let api = TodosApi::new(client, transport);
            let update = UpdateTodo {
                title: Some(title.into_inner()),
                completed: None,
            };
            let todo = api.update(id, &update).map_err(|e| anyhow!(e.message()))?;
            output.todo(&todo)
        }
        Commands::Render { out } => {
            // A failed load still renders; the page shows the error state.
            let mut page = TodoPage::new(client, transport).with_options(options);
            page.mount();
            let html = page.render();
            match out {
                Some(path) => {
                    std::fs::write(&path, &html)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    Ok(format!("Wrote {}", path.display()))
                }
                None => Ok(html),
            }
        }
    }
}

fn mounted<T: Transport>(
    client: TodoClient,
    transport: T,
    options: PageOptions,
) -> Result<TodoPage<T>> {
    let mut page = TodoPage::new(client, transport).with_options(options);
    match page.mount() {
        Settled::Loaded { count } => {
            debug!(count, "list loaded");
            Ok(page)
        }
        Settled::LoadFailed { message } => bail!("Error loading todos: {message}"),
        other => bail!("unexpected outcome: {other:?}"),
    }
}

fn mutation_error(settled: Settled) -> anyhow::Error {
    match settled {
        Settled::MutationFailed {
            mutation,
            id,
            error,
        } => anyhow!(error.message()).context(format!("{} {id} failed", mutation.as_str())),
        other => anyhow!("unexpected outcome: {other:?}"),
    }
}
