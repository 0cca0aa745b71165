// Optional logging. Without the `log` feature these expand to nothing, so the
// arguments are never evaluated on bare-metal builds.

#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_trace {
    ($($arg:tt)*) => { log::trace!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_trace {
    ($($arg:tt)*) => {};
}
