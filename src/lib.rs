//! BlockSnake: a tick-driven terminal snake game.
//!
//! The [`engine::Engine`] owns every game object and the round state and
//! drives the input → update → render cycle. Terminal concerns live behind
//! the [`engine::Display`] and [`engine::InputSource`] traits, implemented
//! with crossterm in [`term`].

pub mod config;
pub mod engine;
pub mod food;
pub mod geometry;
pub mod overlay;
pub mod palette;
pub mod snake;
pub mod state;
pub mod term;
