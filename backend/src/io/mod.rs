//! # IO Layer
//!
//! The interface layer that exposes domain functionality to the UI.

pub mod rest;

pub use rest::*;
