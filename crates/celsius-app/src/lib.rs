//! Celsius front end
//!
//! Wires configuration, the gazetteer, the weather provider and the radar
//! player into a line-oriented interface.

pub mod app;
pub mod render;
pub mod session;

pub use app::App;
pub use session::{SearchSession, SessionEvent};
