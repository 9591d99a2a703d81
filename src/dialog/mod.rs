//! Toolkit-independent model of the versment entry dialog.
//!
//! A presentation layer forwards key and selection events to
//! [`client_search::ClientSearch`] and field edits to
//! [`versment::VersmentDialog`], then renders their state.

pub mod client_search;
pub mod versment;
