//! Terminal platform layer: drives the core state machine and runs its effects.
pub mod app;
pub mod clipboard;
pub mod effects;
pub mod files;
pub mod input;
pub mod ui;
