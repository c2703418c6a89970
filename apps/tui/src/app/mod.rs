// App module for retail_dash
// Handles application state and key input

pub mod input;
pub mod state;

pub use input::{handle_input, Command};
pub use state::{App, FilterFocus};
