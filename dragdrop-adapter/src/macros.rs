#[cfg(feature = "tracing")]
macro_rules! adtrace {
    ($($tt:tt)*) => {
        tracing::trace!(target: "dragdrop_adapter", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! adtrace {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! adwarn {
    ($($tt:tt)*) => {
        tracing::warn!(target: "dragdrop_adapter", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! adwarn {
    ($($tt:tt)*) => {};
}
