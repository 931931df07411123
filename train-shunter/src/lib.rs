//! Train composition.
//!
//! Models trains as a locomotive pulling a doubly-linked chain of wagons,
//! and provides the shunting operations on them: attaching, inserting,
//! moving, splitting and reversing wagon sequences, each checked against
//! the engine's capacity and the train's kind before any link is touched.
//!
//! Wagons live in a [`yard::Yard`]; trains refer to their first wagon by
//! key and borrow the yard for every operation.

pub mod config;
pub mod domain;
pub mod train;
pub mod yard;
