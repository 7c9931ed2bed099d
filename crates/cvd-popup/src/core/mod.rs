//! Core, DOM-free primitives for the popup.
pub mod cvd;
pub mod dom;
pub mod phase;
pub mod ports;
