pub mod classify;
pub mod handle;
pub mod list;

pub use classify::classify_command;
pub use handle::handle_command;
pub use list::list_command;
