//! Basic graph structures and traits shared by all state space representations in this
//! crate, in the spirit of `lib-biodivine_std`.

pub mod structs;
pub mod traits;

pub use structs::{DirectionAtom, IdState, IdStateRange, Transition};
pub use traits::TransitionSystem;
