//! Rendering: component state → [`View`] → HTML or terminal text.

use std::fmt::Write as _;

use crate::component::{QueryComponent, RequestState};

/// What appears below the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBlock {
    Spinner,
    Answer {
        question: String,
        answer: String,
        url: String,
    },
    Error(String),
}

/// Everything the component shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub title: String,
    pub docs_label: String,
    pub docs_url: String,
    pub input: String,
    pub placeholder: String,
    pub submit_enabled: bool,
    pub response: Option<ResponseBlock>,
}

/// Pure function of the component's state.
pub fn render(component: &QueryComponent) -> View {
    let settings = component.settings();
    View {
        title: settings.title.clone(),
        docs_label: settings.docs_label.clone(),
        docs_url: settings.docs_url.clone(),
        input: component.input().to_string(),
        placeholder: settings.placeholder.clone(),
        submit_enabled: component.can_submit(),
        response: response_block(component),
    }
}

fn response_block(component: &QueryComponent) -> Option<ResponseBlock> {
    if component.state() == RequestState::Pending {
        return Some(ResponseBlock::Spinner);
    }
    if let Some(notice) = component.failure() {
        return Some(ResponseBlock::Error(notice.message.clone()));
    }
    component.answer().map(|a| ResponseBlock::Answer {
        question: a.question.clone(),
        answer: a.answer.clone(),
        url: a.url.clone(),
    })
}

impl View {
    pub fn is_loading(&self) -> bool {
        matches!(self.response, Some(ResponseBlock::Spinner))
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, r#"<div class="docs-gpt">"#);
        let _ = writeln!(out, r#"  <h1 class="docs-gpt-title">{}</h1>"#, escape(&self.title));
        let _ = writeln!(
            out,
            r#"  <a class="docs-gpt-documentation" href="{}" target="_blank" rel="noreferrer">{}</a>"#,
            escape(&self.docs_url),
            escape(&self.docs_label)
        );
        let _ = writeln!(out, r#"  <div class="docs-gpt-input-container">"#);
        let _ = writeln!(
            out,
            r#"    <input type="text" class="docs-gpt-input" value="{}" placeholder="{}" />"#,
            escape(&self.input),
            escape(&self.placeholder)
        );
        let disabled = if self.submit_enabled { "" } else { " disabled" };
        let _ = writeln!(
            out,
            r#"    <button class="docs-gpt-button"{}>Send</button>"#,
            disabled
        );
        let _ = writeln!(out, "  </div>");
        if let Some(block) = &self.response {
            out.push_str(&block.to_html());
        }
        out.push_str("</div>\n");
        out
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);
        let _ = writeln!(out, "{} <{}>", self.docs_label, self.docs_url);
        if self.input.is_empty() {
            let _ = writeln!(out, "> ({})", self.placeholder);
        } else {
            let _ = writeln!(out, "> {}", self.input);
        }
        let _ = writeln!(
            out,
            "[Send]{}",
            if self.submit_enabled { "" } else { " (disabled)" }
        );
        if let Some(block) = &self.response {
            out.push('\n');
            out.push_str(&block.to_text());
        }
        out
    }
}

impl ResponseBlock {
    pub fn to_html(&self) -> String {
        match self {
            ResponseBlock::Spinner => concat!(
                r#"  <div class="docs-gpt-response">"#,
                r#"<div class="docs-gpt-spinner" role="status" aria-label="loading"></div>"#,
                "</div>\n"
            )
            .to_string(),
            ResponseBlock::Answer {
                question,
                answer,
                url,
            } => format!(
                concat!(
                    r#"  <div class="docs-gpt-response"><strong>{}</strong><br />{}</div>"#,
                    "\n",
                    r#"  <div class="docs-gpt-response-source">Source:<a href="{}" target="_blank" rel="noreferrer">{}</a></div>"#,
                    "\n"
                ),
                escape(question),
                escape(answer),
                escape(url),
                escape(url)
            ),
            ResponseBlock::Error(message) => format!(
                "  <div class=\"docs-gpt-error\" role=\"alert\">{}</div>\n",
                escape(message)
            ),
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            ResponseBlock::Spinner => "Loading...\n".to_string(),
            ResponseBlock::Answer {
                question,
                answer,
                url,
            } => format!("{}\n{}\n\nSource: {}\n", question, answer, url),
            ResponseBlock::Error(message) => format!("Error: {}\n", message),
        }
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
