//! Roll-call draw core.
//!
//! This crate holds the logic that decides who gets called:
//!
//! - **Filter policy**: the displayed list and the draw pool
//! - **Draw engine**: uniform or weighted sampling, with or without replacement
//! - **Session updates**: drawn flags, default attendance marking, history, reset
//! - **Summary**: roster counters for status displays
//!
//! # Example
//!
//! ```ignore
//! use rollcall_core::perform_draw;
//!
//! let mut rng = rand::thread_rng();
//! let drawn = perform_draw(&mut state, &mut rng)?;
//! ```

mod draw;
mod error;
mod filter;
mod session;
mod summary;

pub use draw::{DrawOptions, draw, draw_with_rng};
pub use error::{CoreError, Result};
pub use filter::{display_pool, draw_pool};
pub use session::{apply_draw_result, perform_draw, record_history, reset_draw, select_displayed};
pub use summary::RosterSummary;
