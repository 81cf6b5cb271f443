//! padmap - gamepad action-mapping tester
//!
//! Polls a connected game controller, translates its raw button/axis/hat
//! state into a fixed vocabulary of named logical actions, and shows the
//! active actions in a small window while echoing transitions to the console.

pub mod actions;
pub mod config;
pub mod diagnostics;
pub mod input;
pub mod session;
pub mod translator;
pub mod visualizer;
