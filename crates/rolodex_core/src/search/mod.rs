//! Person search entry points.
//!
//! # Responsibility
//! - Turn field/keyword criteria into filters for the displayed person list.
//! - Keep matching rules pure and free of directory state.

pub mod predicate;
