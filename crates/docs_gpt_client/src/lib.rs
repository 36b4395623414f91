//! Documentation Q&A component: config, HTTP answer client, component state,
//! rendering, and the event loop that hosts it. Used by the `docs-gpt` binary.

pub mod client;
pub mod component;
pub mod config;
pub mod messages;
pub mod session;
pub mod view;

pub use client::{AnswerBackend, Client, ClientError};
pub use component::{FailureNotice, QueryComponent, RequestState, Submission, SubmitError};
pub use config::{default_config_path, Config, ConfigError, FailurePolicy, UiSettings};
pub use messages::{AnswerPayload, HealthStatus};
pub use session::{RenderFormat, Session, UiEvent};
pub use view::{ResponseBlock, View};
