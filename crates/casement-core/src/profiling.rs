//! Profiling utilities based on the `puffin` crate.
//!
//! With the `profiling` feature disabled the scope macros expand to nothing,
//! so instrumented code does not need its own `cfg` guards.

#[cfg(feature = "profiling")]
pub use puffin::{GlobalProfiler, profile_function, profile_scope};

#[cfg(not(feature = "profiling"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __casement_profile_noop {
    ($($tt:tt)*) => {};
}

#[cfg(not(feature = "profiling"))]
pub use crate::__casement_profile_noop as profile_function;
#[cfg(not(feature = "profiling"))]
pub use crate::__casement_profile_noop as profile_scope;

#[cfg(feature = "profiling")]
mod server {
    use std::sync::OnceLock;

    /// Profiling backend options.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ProfilingBackend {
        /// Send profiling data to puffin_viewer via HTTP.
        PuffinHttp,
    }

    /// Address the puffin HTTP server listens on.
    pub const PUFFIN_ADDR: &str = "127.0.0.1:8585";

    static PROFILING_SERVER: OnceLock<puffin_http::Server> = OnceLock::new();

    /// Initialize profiling with the specified backend.
    ///
    /// # Example
    /// ```no_run
    /// use casement_core::profiling::{init_profiling, ProfilingBackend};
    ///
    /// init_profiling(ProfilingBackend::PuffinHttp);
    /// ```
    pub fn init_profiling(backend: ProfilingBackend) {
        match backend {
            ProfilingBackend::PuffinHttp => {
                puffin::set_scopes_on(true);
                match puffin_http::Server::new(PUFFIN_ADDR) {
                    Ok(server) => {
                        tracing::info!("Puffin profiler server started on http://{}", PUFFIN_ADDR);
                        let _ = PROFILING_SERVER.set(server);
                    }
                    Err(e) => {
                        tracing::error!("Failed to start puffin server: {}", e);
                    }
                }
            }
        }
    }

    /// Mark the start of a new frame. Call once per message-pump iteration.
    #[inline]
    pub fn new_frame() {
        puffin::GlobalProfiler::lock().new_frame();
    }
}

#[cfg(feature = "profiling")]
pub use server::{PUFFIN_ADDR, ProfilingBackend, init_profiling, new_frame};

#[cfg(not(feature = "profiling"))]
#[inline]
pub fn new_frame() {}
