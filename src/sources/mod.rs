//! Input signals for the solver.
//!
//! An [`InputSignal`] is a uniformly sampled voltage sequence plus the
//! [`InputClass`] that decides how it is decimated for display. Signals come
//! either from the built-in [`Waveform`] generator (short synthetic
//! windows) or from decoded audio supplied by the host.

mod signal;
mod waveform;

pub use signal::{InputClass, InputSignal};
pub use waveform::{Shape, Waveform, MAX_GENERATED_SAMPLES};
