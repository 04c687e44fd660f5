//! Interactive picker orchestration on top of rofi.
//!
//! A [`Menu`] describes what to display, launches the picker through a
//! short-lived supervisor flow so the caller never waits for the picker to
//! start up, and later recovers the user's selection over a private channel.
//! Both tracked processes are torn down idempotently on [`Menu::destroy`],
//! so nothing lingers after the calling script is done.

pub mod command;
pub mod config;
pub mod error;
pub mod instance;

pub use command::build_command;
pub use config::{LineStatus, MenuConfig, MenuKind, MenuSettings, TimeoutPolicy};
pub use error::{MenuError, MenuResult};
pub use instance::{Menu, LOADING_MESSAGE};
