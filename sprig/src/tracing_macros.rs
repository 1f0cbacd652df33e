//! Crate-local tracing macros.
//!
//! Forward to [`tracing`] when the `tracing` feature is enabled and expand to
//! nothing otherwise, so call sites stay unconditional.

#[cfg(feature = "tracing")]
macro_rules! trace {
    ($($arg:tt)*) => { tracing::trace!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($arg:tt)*) => {
        ()
    };
}

#[cfg(feature = "tracing")]
macro_rules! debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug {
    ($($arg:tt)*) => {
        ()
    };
}

pub(crate) use {debug, trace};
