//! Small markup primitives shared by the page renderer.
//!
//! Every function returns an HTML fragment. Text and attribute values are
//! escaped here, so callers pass raw strings.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
    Default,
    Success,
    Destructive,
}

impl BadgeVariant {
    fn class(self) -> &'static str {
        match self {
            BadgeVariant::Default => "badge",
            BadgeVariant::Success => "badge badge-success",
            BadgeVariant::Destructive => "badge badge-destructive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonVariant {
    Primary,
    Ghost,
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn flag(name: &str, on: bool) -> String {
    if on {
        format!(" {name}")
    } else {
        String::new()
    }
}

pub fn badge(variant: BadgeVariant, testid: &str, text: &str) -> String {
    format!(
        r#"<span class="{}" data-testid="{}">{}</span>"#,
        variant.class(),
        escape(testid),
        escape(text)
    )
}

pub fn spinner() -> String {
    r#"<span class="spinner" role="status" aria-label="Loading"></span>"#.to_string()
}

/// A card wrapper; `inner` is trusted markup.
pub fn card(testid: &str, inner: &str) -> String {
    format!(r#"<section class="card" data-testid="{}">{inner}</section>"#, escape(testid))
}

pub fn empty_state(title: &str, description: Option<&str>) -> String {
    let mut out = String::from(r#"<div class="empty-state">"#);
    out.push_str(&format!("<h3>{}</h3>", escape(title)));
    if let Some(description) = description {
        out.push_str(&format!("<p>{}</p>", escape(description)));
    }
    out.push_str("</div>");
    out
}

pub struct InputProps<'a> {
    pub testid: &'a str,
    pub value: &'a str,
    pub placeholder: &'a str,
    pub aria_label: &'a str,
    pub disabled: bool,
}

pub fn text_input(props: &InputProps<'_>) -> String {
    format!(
        r#"<input type="text" class="input" value="{}" placeholder="{}" aria-label="{}" data-testid="{}"{}>"#,
        escape(props.value),
        escape(props.placeholder),
        escape(props.aria_label),
        escape(props.testid),
        flag("disabled", props.disabled)
    )
}

pub struct ButtonProps<'a> {
    pub testid: &'a str,
    pub variant: ButtonVariant,
    pub submit: bool,
    pub disabled: bool,
    pub aria_label: Option<&'a str>,
    pub title: Option<&'a str>,
}

/// `content` is trusted markup.
pub fn button(props: &ButtonProps<'_>, content: &str) -> String {
    let mut out = format!(
        r#"<button type="{}" class="{}" data-testid="{}""#,
        if props.submit { "submit" } else { "button" },
        match props.variant {
            ButtonVariant::Primary => "button",
            ButtonVariant::Ghost => "button button-ghost",
        },
        escape(props.testid)
    );
    if let Some(label) = props.aria_label {
        out.push_str(&format!(r#" aria-label="{}""#, escape(label)));
    }
    if let Some(title) = props.title {
        out.push_str(&format!(r#" title="{}""#, escape(title)));
    }
    out.push_str(&flag("disabled", props.disabled));
    out.push_str(&format!(">{content}</button>"));
    out
}

pub fn checkbox(testid: &str, checked: bool, disabled: bool, aria_label: &str) -> String {
    format!(
        r#"<input type="checkbox" class="checkbox" data-testid="{}" aria-label="{}"{}{}>"#,
        escape(testid),
        escape(aria_label),
        flag("checked", checked),
        flag("disabled", disabled)
    )
}
