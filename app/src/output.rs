//! Output formatting for the CLI
//!
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag), ids only

use anyhow::Result;
use todo_core::view::ListView;
use todo_core::{Paginated, Snapshot, Todo};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
    Quiet,
}

impl OutputFormat {
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

pub struct Output {
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn todo(&self, todo: &Todo) -> Result<String> {
        Ok(match self.format {
            OutputFormat::Human => {
                let mut out = String::new();
                out.push_str(&format!("ID:        {}\n", todo.id));
                out.push_str(&format!("Title:     {}\n", todo.title));
                out.push_str(&format!("Completed: {}\n", if todo.completed { "yes" } else { "no" }));
                out.push_str(&format!("Created:   {}\n", todo.created_at.format("%Y-%m-%d %H:%M")));
                out.push_str(&format!("Updated:   {}", todo.updated_at.format("%Y-%m-%d %H:%M")));
                out
            }
            OutputFormat::Json => serde_json::to_string_pretty(todo)?,
            OutputFormat::Quiet => todo.id.to_string(),
        })
    }

    /// The list area as the page would show it: loading, error, empty or rows.
    pub fn list(&self, snapshot: &Snapshot<'_>) -> Result<String> {
        let view = ListView::of(snapshot);
        Ok(match self.format {
            OutputFormat::Human => match view {
                ListView::Loading => "Loading todos...".to_string(),
                ListView::Error(message) => format!("Error loading todos: {message}"),
                ListView::Empty => "No todos. Time to add more Todos!".to_string(),
                ListView::Populated(todos) => {
                    let mut lines: Vec<String> = todos.iter().map(row).collect();
                    let done = todos.iter().filter(|t| t.completed).count();
                    lines.push(String::new());
                    lines.push(format!("{done} of {} completed", todos.len()));
                    lines.join("\n")
                }
            },
            OutputFormat::Json => serde_json::to_string_pretty(snapshot.todos)?,
            OutputFormat::Quiet => snapshot
                .todos
                .iter()
                .map(|t| t.id.to_string())
                .collect::<Vec<_>>()
                .join("\n"),
        })
    }

    pub fn page(&self, page: &Paginated<Todo>, number: u32) -> Result<String> {
        Ok(match self.format {
            OutputFormat::Human => {
                let mut lines: Vec<String> = page.results.iter().map(row).collect();
                if lines.is_empty() {
                    lines.push("No todos.".to_string());
                }
                lines.push(String::new());
                let mut footer = format!("page {number}, {} todo(s) total", page.count);
                if page.next.is_some() {
                    footer.push_str(&format!(", next: --page {}", number + 1));
                }
                lines.push(footer);
                lines.join("\n")
            }
            OutputFormat::Json => serde_json::to_string_pretty(page)?,
            OutputFormat::Quiet => page
                .results
                .iter()
                .map(|t| t.id.to_string())
                .collect::<Vec<_>>()
                .join("\n"),
        })
    }
}

fn row(todo: &Todo) -> String {
    let mark = if todo.completed { "x" } else { " " };
    let done = if todo.completed { "  Done" } else { "" };
    format!("[{mark}] {}  {}{done}", &todo.id.to_string()[..8], todo.title)
}
