//! Game implementations.
//!
//! Concrete games live outside the search core and reach it only through
//! [`GameState`](crate::rules::GameState).

pub mod connect_four;
