//! HTML rendering of the todo page.
//!
//! # Design
//! Rendering is a pure function of a controller `Snapshot` and the add form.
//! The `data-testid` attributes are the contract automated tests drive the UI
//! through; they are listed in `testid` and must not change.
//!
//! The list area shows exactly one of four states, checked in order:
//! loading, error, empty, populated.

pub mod components;

use crate::controller::Snapshot;
use crate::form::AddForm;
use crate::types::Todo;

use components::{
    badge, button, card, checkbox, empty_state, escape, spinner, text_input, BadgeVariant,
    ButtonProps, ButtonVariant, InputProps,
};

pub mod testid {
    pub const TITLE: &str = "todos.title";
    pub const ADD_FORM: &str = "todos.add.form";
    pub const ADD_INPUT: &str = "todos.add.input";
    pub const ADD_SUBMIT: &str = "todos.add.submit";
    pub const ADD_ERROR: &str = "todos.add.error";
    pub const LOADING: &str = "todos.loading";
    pub const ERROR: &str = "todos.error";
    pub const EMPTY: &str = "todos.empty";
    pub const LIST: &str = "todos.list";
    pub const ITEM: &str = "todos.item";
    pub const ITEM_CHECKBOX: &str = "todos.item.checkbox";
    pub const ITEM_TITLE: &str = "todos.item.title";
    pub const ITEM_BADGE: &str = "todos.item.badge";
    pub const ITEM_COPY: &str = "todos.item.copy";
    pub const ITEM_DELETE: &str = "todos.item.delete";
    pub const STATS: &str = "todos.stats";
}

#[derive(Debug, Clone)]
pub struct PageOptions {
    pub heading: String,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            heading: "TODO List".to_string(),
        }
    }
}

/// The single list state that renders for a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListView<'a> {
    Loading,
    Error(&'a str),
    Empty,
    Populated(&'a [Todo]),
}

impl<'a> ListView<'a> {
    pub fn of(snapshot: &Snapshot<'a>) -> Self {
        if snapshot.loading {
            ListView::Loading
        } else if let Some(message) = snapshot.error {
            ListView::Error(message)
        } else if snapshot.todos.is_empty() {
            ListView::Empty
        } else {
            ListView::Populated(snapshot.todos)
        }
    }
}

pub fn render_page(snapshot: &Snapshot<'_>, form: &AddForm, options: &PageOptions) -> String {
    let heading = escape(&options.heading);
    let mut out = format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"en\">\n",
            "<head><meta charset=\"utf-8\"><title>{heading}</title></head>\n",
            "<body>\n<main class=\"todo-app\">\n",
            "<header><h1 data-testid=\"{title}\">{heading}</h1></header>\n",
        ),
        heading = heading,
        title = testid::TITLE,
    );
    out.push_str(&render_form(form, snapshot.adding));
    out.push('\n');
    out.push_str(&render_list(snapshot));
    out.push('\n');
    if let Some(stats) = render_stats(snapshot) {
        out.push_str(&stats);
        out.push('\n');
    }
    out.push_str("</main>\n</body>\n</html>\n");
    out
}

pub fn render_form(form: &AddForm, adding: bool) -> String {
    let mut out = format!(r#"<form class="add-form" data-testid="{}">"#, testid::ADD_FORM);
    out.push_str(r#"<div class="add-form-field">"#);
    out.push_str(&text_input(&InputProps {
        testid: testid::ADD_INPUT,
        value: form.input(),
        placeholder: "TODO description",
        aria_label: "New todo title",
        disabled: adding,
    }));
    if let Some(error) = form.error() {
        out.push_str(&format!(
            r#"<p class="field-error" data-testid="{}">{}</p>"#,
            testid::ADD_ERROR,
            escape(error)
        ));
    }
    out.push_str("</div>");
    let label = if adding { spinner() } else { "+".to_string() };
    out.push_str(&button(
        &ButtonProps {
            testid: testid::ADD_SUBMIT,
            variant: ButtonVariant::Primary,
            submit: true,
            disabled: !form.can_submit(adding),
            aria_label: None,
            title: None,
        },
        &label,
    ));
    out.push_str("</form>");
    out
}

pub fn render_list(snapshot: &Snapshot<'_>) -> String {
    match ListView::of(snapshot) {
        ListView::Loading => card(
            testid::LOADING,
            &format!(r#"{}<p class="muted">Loading todos...</p>"#, spinner()),
        ),
        ListView::Error(message) => card(
            testid::ERROR,
            &empty_state("Error loading todos", Some(message)),
        ),
        ListView::Empty => card(
            testid::EMPTY,
            &empty_state("No todos", Some("Time to add more Todos!")),
        ),
        ListView::Populated(todos) => {
            let items: String = todos
                .iter()
                .map(|todo| render_item(todo, snapshot.active_id == Some(todo.id)))
                .collect();
            card(testid::LIST, &items)
        }
    }
}

/// One row. `busy` disables every control on it.
pub fn render_item(todo: &Todo, busy: bool) -> String {
    let title = &todo.title;
    let mut out = format!(
        r#"<div class="todo-item" data-testid="{}" data-id="{}">"#,
        testid::ITEM,
        todo.id
    );
    let next_state = if todo.completed { "incomplete" } else { "complete" };
    out.push_str(&checkbox(
        testid::ITEM_CHECKBOX,
        todo.completed,
        busy,
        &format!("Mark \"{title}\" as {next_state}"),
    ));
    out.push_str(&format!(
        r#"<span class="{}" data-testid="{}">{}</span>"#,
        if todo.completed { "todo-title done" } else { "todo-title" },
        testid::ITEM_TITLE,
        escape(title)
    ));
    if todo.completed {
        out.push_str(&badge(BadgeVariant::Success, testid::ITEM_BADGE, "Done"));
    }
    out.push_str(&button(
        &ButtonProps {
            testid: testid::ITEM_COPY,
            variant: ButtonVariant::Ghost,
            submit: false,
            disabled: busy,
            aria_label: Some(&format!("Copy \"{title}\"")),
            title: Some("Copy this todo"),
        },
        "Copy",
    ));
    out.push_str(&button(
        &ButtonProps {
            testid: testid::ITEM_DELETE,
            variant: ButtonVariant::Ghost,
            submit: false,
            disabled: busy,
            aria_label: Some(&format!("Delete \"{title}\"")),
            title: None,
        },
        "Delete",
    ));
    out.push_str("</div>");
    out
}

/// "N of M completed", only alongside a populated list.
pub fn render_stats(snapshot: &Snapshot<'_>) -> Option<String> {
    let ListView::Populated(todos) = ListView::of(snapshot) else {
        return None;
    };
    let done = todos.iter().filter(|t| t.completed).count();
    Some(format!(
        r#"<div class="todo-stats" data-testid="{}">{done} of {} completed</div>"#,
        testid::STATS,
        todos.len()
    ))
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use uuid::Uuid;

    use super::*;

    fn todo(id: u128, title: &str, completed: bool) -> Todo {
        let at = "2024-05-01T10:00:00Z".parse().unwrap();
        Todo {
            id: Uuid::from_u128(id),
            title: title.to_string(),
            completed,
            created_at: at,
            updated_at: at,
        }
    }

    fn snapshot<'a>(todos: &'a [Todo], loading: bool, error: Option<&'a str>) -> Snapshot<'a> {
        Snapshot {
            todos,
            loading,
            adding: false,
            error,
            active_id: None,
        }
    }

    fn by_testid(id: &str) -> Selector {
        Selector::parse(&format!(r#"[data-testid="{id}"]"#)).unwrap()
    }

    fn count(html: &str, id: &str) -> usize {
        Html::parse_document(html).select(&by_testid(id)).count()
    }

    fn page(snapshot: &Snapshot<'_>, form: &AddForm) -> String {
        render_page(snapshot, form, &PageOptions::default())
    }

    #[test]
    fn loading_hides_everything_else() {
        let todos = [todo(1, "a", false)];
        let html = page(&snapshot(&todos, true, Some("boom")), &AddForm::new());
        assert_eq!(count(&html, testid::LOADING), 1);
        for other in [testid::ERROR, testid::EMPTY, testid::LIST, testid::STATS] {
            assert_eq!(count(&html, other), 0, "{other}");
        }
    }

    #[test]
    fn error_beats_stale_list() {
        let todos = [todo(1, "a", false)];
        let html = page(&snapshot(&todos, false, Some("Not found.")), &AddForm::new());
        assert_eq!(count(&html, testid::ERROR), 1);
        assert_eq!(count(&html, testid::LIST), 0);
        assert!(html.contains("Not found."));
    }

    #[test]
    fn empty_list_shows_empty_state() {
        let html = page(&snapshot(&[], false, None), &AddForm::new());
        assert_eq!(count(&html, testid::EMPTY), 1);
        assert_eq!(count(&html, testid::LIST), 0);
        assert_eq!(count(&html, testid::STATS), 0);
    }

    #[test]
    fn populated_list_renders_items_badges_and_stats() {
        let todos = [todo(1, "Buy <milk>", true), todo(2, "Walk dog", false)];
        let html = page(&snapshot(&todos, false, None), &AddForm::new());
        let doc = Html::parse_document(&html);

        let items: Vec<_> = doc.select(&by_testid(testid::ITEM)).collect();
        assert_eq!(items.len(), 2);
        let first_title: String = items[0]
            .select(&by_testid(testid::ITEM_TITLE))
            .next()
            .unwrap()
            .text()
            .collect();
        assert_eq!(first_title, "Buy <milk>");
        assert_eq!(items[0].select(&by_testid(testid::ITEM_BADGE)).count(), 1);
        assert_eq!(items[1].select(&by_testid(testid::ITEM_BADGE)).count(), 0);

        let stats: String = doc.select(&by_testid(testid::STATS)).next().unwrap().text().collect();
        assert_eq!(stats, "1 of 2 completed");
    }

    #[test]
    fn active_item_controls_are_disabled() {
        let todos = [todo(1, "a", false), todo(2, "b", false)];
        let mut snap = snapshot(&todos, false, None);
        snap.active_id = Some(Uuid::from_u128(2));
        let doc = Html::parse_document(&render_list(&snap));
        let items: Vec<_> = doc.select(&by_testid(testid::ITEM)).collect();
        for id in [testid::ITEM_CHECKBOX, testid::ITEM_COPY, testid::ITEM_DELETE] {
            let first = items[0].select(&by_testid(id)).next().unwrap();
            let second = items[1].select(&by_testid(id)).next().unwrap();
            assert!(first.value().attr("disabled").is_none(), "{id}");
            assert!(second.value().attr("disabled").is_some(), "{id}");
        }
    }

    #[test]
    fn checkbox_label_names_next_state() {
        let html = render_item(&todo(1, "Ship", true), false);
        assert!(html.contains(r#"aria-label="Mark &quot;Ship&quot; as incomplete""#));
        assert!(html.contains(" checked"));
    }

    #[test]
    fn submit_tracks_trimmed_input() {
        let mut form = AddForm::new();
        let doc = Html::parse_document(&render_form(&form, false));
        let submit = doc.select(&by_testid(testid::ADD_SUBMIT)).next().unwrap();
        assert!(submit.value().attr("disabled").is_some());

        form.edit("Test");
        let doc = Html::parse_document(&render_form(&form, false));
        let submit = doc.select(&by_testid(testid::ADD_SUBMIT)).next().unwrap();
        assert!(submit.value().attr("disabled").is_none());
        let input = doc.select(&by_testid(testid::ADD_INPUT)).next().unwrap();
        assert_eq!(input.value().attr("value"), Some("Test"));
    }

    #[test]
    fn adding_disables_input_and_shows_spinner() {
        let mut form = AddForm::new();
        form.edit("Test");
        let html = render_form(&form, true);
        let doc = Html::parse_document(&html);
        let input = doc.select(&by_testid(testid::ADD_INPUT)).next().unwrap();
        assert!(input.value().attr("disabled").is_some());
        assert!(html.contains(r#"class="spinner""#));
    }

    #[test]
    fn inline_error_renders_under_input() {
        let mut form = AddForm::new();
        form.submit();
        let html = render_form(&form, false);
        let doc = Html::parse_document(&html);
        let error: String = doc.select(&by_testid(testid::ADD_ERROR)).next().unwrap().text().collect();
        assert_eq!(error, crate::form::EMPTY_TITLE_MESSAGE);
    }

    #[test]
    fn heading_uses_page_options() {
        let options = PageOptions {
            heading: "Team & Tasks".to_string(),
        };
        let html = render_page(&snapshot(&[], false, None), &AddForm::new(), &options);
        let doc = Html::parse_document(&html);
        let heading: String = doc.select(&by_testid(testid::TITLE)).next().unwrap().text().collect();
        assert_eq!(heading, "Team & Tasks");
    }
}
