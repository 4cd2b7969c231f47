#[macro_use]
extern crate serde;

#[macro_use]
extern crate tracing as log;

pub mod config;
pub mod error;
pub mod form;
pub mod state;

pub use error::Error;
pub use state::{Change, EditorState};
