//! Notification rounds for emergency lifecycle events.
//!
//! A round runs trigger check → recipient resolution → one payload build →
//! concurrent dispatch, and always ends in a [`RoundOutcome`]. A round is
//! never reported to its caller as failed; errors become
//! [`RoundOutcome::Aborted`].
//!
//! ```rust,ignore
//! let dispatcher = Dispatcher::new(Arc::new(store), Arc::new(transport));
//! let outcome = dispatcher.on_create(&record).await;
//! ```

pub mod error;
pub mod fanout;
pub mod outcome;
pub mod resolver;
pub mod trigger;

pub use error::RoundError;
pub use outcome::{RoundOutcome, SendFailure, SkipReason};
pub use trigger::Dispatcher;
