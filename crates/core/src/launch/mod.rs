//! Launch configurations and the stores that hold them

pub mod descriptor;
pub mod store;

pub use descriptor::{LaunchConfigDescriptor, LaunchKind, NewLaunchConfig, launch_label};
pub use store::{JsonFileStore, LaunchConfigStore, MemoryStore, unique_name};
