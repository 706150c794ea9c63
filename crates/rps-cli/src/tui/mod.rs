//! Fixed-rate terminal runtime.
//!
//! The game state only advances on ticks. Key events arriving between ticks
//! are handed to the app immediately, and the screen is redrawn whenever a
//! tick or an event may have changed what is shown.

pub use self::{app::App, runtime::Runtime};

mod app;
mod event;
mod event_loop;
mod runtime;
