/*
 * Public entry point for the guisher crate, a minimal native Win32 windowing
 * shim: top-level windows, push buttons, fixed-position text labels, and a
 * blocking message loop. This module wires together the portable pieces
 * (types, registry, dispatch) and the Windows-specific binding so downstream
 * applications can treat it as a single dependency.
 *
 * The library exposes only the safe API surface (`App`, `Window`, the config
 * structs) while keeping Win32 internals scoped to the crate. Conditional
 * compilation keeps the portable pieces available on every platform so
 * non-Windows builds can still compile and test logic that depends on them;
 * only window construction itself demands a Win32 host.
 */
pub mod app;
pub mod content;
#[cfg(any(target_os = "windows", test))]
pub(crate) mod dispatch;
pub mod error;
#[cfg(any(target_os = "windows", test))]
pub(crate) mod painting;
#[cfg(not(target_os = "windows"))]
pub(crate) mod platform_stub;
#[cfg(target_os = "windows")]
pub(crate) mod platform_windows;
#[cfg(not(target_os = "windows"))]
pub(crate) use platform_stub as platform;
#[cfg(target_os = "windows")]
pub(crate) use platform_windows as platform;
pub(crate) mod registry;
pub mod types;
pub mod window;

pub use app::App;
pub use content::{ContentFetcher, host_from_url, path_from_url, port_from_url};
pub use error::{PlatformError, Result as PlatformResult};
pub use types::{ButtonOptions, ClickHandler, ControlId, Label, NativeHandle, WindowConfig};
pub use window::Window;
