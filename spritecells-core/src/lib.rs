// SpriteCells Core Library
// Cell geometry, undo/redo and input handling for the sprite sheet editor

pub mod transform;
pub mod cell;
pub mod document;
pub mod selection;
pub mod action;
pub mod actions;
pub mod tool;
pub mod handlers;
pub mod dirty;
pub mod renderer;
pub mod config;
pub mod file_io;
pub mod export;
pub mod session;
