//! Application layer for Huddle
//!
//! Pure state machines and a generic runtime for UI and call orchestration.
//! The same orchestration code drives the production terminal UI and the
//! in-process simulated SDK.
//!
//! # Components
//!
//! - [`App`]: UI state machine (key handling, tiles, transcript view)
//! - [`Bridge`]: call bridge (translates App actions to session events)
//! - [`Driver`]: trait for platform-specific I/O abstraction
//! - [`Runtime`]: generic orchestration loop using Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod bridge;
mod driver;
mod event;
mod input;
mod runtime;
mod state;

pub use action::AppAction;
pub use app::App;
pub use bridge::Bridge;
pub use driver::Driver;
pub use event::AppEvent;
pub use input::KeyInput;
pub use runtime::Runtime;
pub use state::{ConnectionState, ControlFlags, Tile};
