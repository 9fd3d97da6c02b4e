//! Terminal front end: argument parsing, screens, and command dispatch.
//!
//! Routes render inside their role shell. Mutating commands are gated by the
//! route that owns them and report their outcome as a single notice line.

mod args;
mod console;
mod error;
mod render;
mod tables;

pub use args::{
    Cli, Command, CreateArgs, DeleteArgs, EditArgs, FeedbackCommand, GlobalArgs, IdArgs,
    LoginArgs, MechanicCommand, OpenArgs, RegisterArgs, ServiceCommand, ServiceRequestCommand,
    UserCommand,
};
pub use console::Console;
pub use error::ConsoleError;
pub use render::{Notice, NoticeKind, write_notice};
