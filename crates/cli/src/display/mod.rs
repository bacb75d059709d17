pub mod command_breakdown;

pub use command_breakdown::{print_command_breakdown, print_plan};
