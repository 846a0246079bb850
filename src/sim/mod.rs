//! Program loading from the assembly-text input format.

pub mod loader;

pub use loader::load_program;
