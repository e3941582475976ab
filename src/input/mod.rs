pub(crate) mod device;
pub(crate) mod emulated;
pub(crate) mod event;
pub(crate) mod low_latency;
pub(crate) mod router;
pub(crate) mod timer;
