//! linepick: an interactive line filter for the terminal.
//!
//! Candidate lines are narrowed down by typing patterns into a single input
//! line. The crate is split into a host-independent input engine
//! ([`editor`], [`input`]), the protocol it speaks to a matching backend
//! ([`protocol`]), a concrete backend ([`menu`]) and a terminal host
//! ([`ui`], [`theme`]).

pub mod config;
pub mod editor;
pub mod input;
pub mod logging;
pub mod menu;
pub mod protocol;
pub mod theme;
pub mod ui;
