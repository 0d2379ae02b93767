//! Taleweaver — resilient client core for the story-generation backend.
//!
//! Provides the pieces the UI layer leans on when talking to an unreliable
//! network service: a typed HTTP gateway, error classification into a
//! closed taxonomy with localized messages, retry with exponential backoff,
//! deduplicated error reporting, and an `idle → loading → (success | error)`
//! state machine for async actions.
//!
//! # Quick Start
//!
//! ```no_run
//! use taleweaver::prelude::*;
//!
//! # #[derive(serde::Deserialize, Clone)]
//! # struct Story { title: String }
//! # async fn example() -> taleweaver::error::Result<()> {
//! let gateway = HttpGateway::from_env()?;
//! let operation: AsyncOperation<Story> = AsyncOperation::new("story-generation");
//!
//! let story = operation
//!     .execute(|| gateway.get_with_error::<Story>("/stories/42"))
//!     .await?;
//! println!("{}", story.title);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod gateway;
pub mod operation;
pub mod prelude;
pub mod report;
pub mod util;
