#[cfg(feature = "tracing")]
macro_rules! ddtrace {
    ($($tt:tt)*) => {
        tracing::trace!(target: "dragdrop", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! ddtrace {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! dddebug {
    ($($tt:tt)*) => {
        tracing::debug!(target: "dragdrop", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! dddebug {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! ddwarn {
    ($($tt:tt)*) => {
        tracing::warn!(target: "dragdrop", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! ddwarn {
    ($($tt:tt)*) => {};
}
