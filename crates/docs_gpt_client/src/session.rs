//! Event loop hosting one [`QueryComponent`].
//!
//! Each input line is typed into the component and submitted. Requests run
//! as spawned tasks; their outcomes are applied back on this loop, so new
//! lines are accepted while earlier questions are still pending. After every
//! state change the whole view is rendered to the output.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinSet;

use crate::client::{AnswerBackend, ClientError};
use crate::component::{QueryComponent, SubmitError};
use crate::messages::AnswerPayload;

/// User actions the component reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Input(String),
    Submit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderFormat {
    #[default]
    Text,
    Html,
}

type Completion = (u64, Result<AnswerPayload, ClientError>);

pub struct Session<B> {
    component: QueryComponent,
    backend: B,
    format: RenderFormat,
    tasks: JoinSet<Completion>,
}

impl<B: AnswerBackend> Session<B> {
    pub fn new(component: QueryComponent, backend: B, format: RenderFormat) -> Self {
        Self {
            component,
            backend,
            format,
            tasks: JoinSet::new(),
        }
    }

    pub fn component(&self) -> &QueryComponent {
        &self.component
    }

    pub fn into_component(self) -> QueryComponent {
        self.component
    }

    /// Number of requests still in flight.
    pub fn outstanding(&self) -> usize {
        self.tasks.len()
    }

    /// Apply one event. `Submit` spawns the request on the current runtime.
    pub fn apply(&mut self, event: UiEvent) -> Result<(), SubmitError> {
        match event {
            UiEvent::Input(text) => {
                self.component.handle_input(text);
                Ok(())
            }
            UiEvent::Submit => {
                let submission = self.component.submit()?;
                let request = self.backend.predict(submission.text);
                let id = submission.id;
                self.tasks.spawn(async move { (id, request.await) });
                Ok(())
            }
        }
    }

    /// Wait for the next in-flight request and apply it.
    /// Returns false when nothing was outstanding.
    pub async fn settle_next(&mut self) -> bool {
        match self.tasks.join_next().await {
            Some(joined) => {
                self.apply_joined(joined);
                true
            }
            None => false,
        }
    }

    /// Drive the component from `input` until it closes (or fails to read)
    /// and every request has completed.
    pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();
        let mut input_open = true;
        self.render(out)?;

        while input_open || !self.tasks.is_empty() {
            tokio::select! {
                line = lines.next_line(), if input_open => match line {
                    Ok(Some(line)) => {
                        let typed = self.apply(UiEvent::Input(line));
                        if let Err(err) = typed.and_then(|()| self.apply(UiEvent::Submit)) {
                            tracing::warn!(error = %err, "submit ignored");
                        }
                        self.render(out)?;
                    }
                    Ok(None) => input_open = false,
                    // Unreadable input ends typing; requests in flight still land.
                    Err(err) => {
                        tracing::warn!(error = %err, "input closed after read error");
                        input_open = false;
                    }
                },
                Some(joined) = self.tasks.join_next(), if !self.tasks.is_empty() => {
                    self.apply_joined(joined);
                    self.render(out)?;
                }
            }
        }
        Ok(())
    }

    fn apply_joined(&mut self, joined: Result<Completion, tokio::task::JoinError>) {
        match joined {
            Ok((id, outcome)) => self.component.resolve(id, outcome),
            Err(err) => tracing::error!(error = %err, "request task did not complete"),
        }
    }

    fn render<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let view = self.component.view();
        let rendered = match self.format {
            RenderFormat::Text => view.to_text(),
            RenderFormat::Html => view.to_html(),
        };
        writeln!(out, "{}", rendered)?;
        out.flush()
    }
}
