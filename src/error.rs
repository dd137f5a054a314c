/*
 * Central error type for the platform layer. All fallible operations in this
 * crate return `error::Result<T>`; recoverable conditions (unknown control
 * ids, out-of-range label indices) are handled locally and never surface
 * here. No panics in production paths.
 */

/// Every error the windowing layer can produce.
#[derive(Debug)]
pub enum PlatformError {
    /// Window construction was attempted on a host without Win32 support.
    UnsupportedPlatform,

    /// Window class registration failed, so no window can be created.
    InitializationFailed(String),

    /// An operation was issued against a dead or unknown native handle.
    InvalidHandle(String),

    /// A native operation failed in a way that has no more specific variant.
    OperationFailed(String),

    /// A raw Win32 API call returned a failure code.
    Win32 {
        /// The name of the failing function, for display purposes.
        function: &'static str,
        /// The raw error code (`GetLastError()` value) or HRESULT bits.
        code: u32,
    },
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedPlatform => {
                write!(f, "guisher currently supports only Windows")
            }
            Self::InitializationFailed(msg) => write!(f, "initialization failed: {msg}"),
            Self::InvalidHandle(msg) => write!(f, "invalid handle: {msg}"),
            Self::OperationFailed(msg) => write!(f, "operation failed: {msg}"),
            Self::Win32 { function, code } => {
                write!(f, "{function} failed (error {code:#010x})")
            }
        }
    }
}

impl std::error::Error for PlatformError {}

// Convert a windows-crate error (HRESULT) directly into a PlatformError so
// that `?` works on `windows::core::Result<T>` throughout the Win32 binding.
#[cfg(target_os = "windows")]
impl From<windows::core::Error> for PlatformError {
    fn from(e: windows::core::Error) -> Self {
        // HRESULT.0 is i32; reinterpret the bits as u32 for display.
        Self::Win32 {
            function: "windows",
            code: e.code().0 as u32,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PlatformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_platform_message_names_the_requirement() {
        let rendered = PlatformError::UnsupportedPlatform.to_string();
        assert_eq!(rendered, "guisher currently supports only Windows");
    }

    #[test]
    fn win32_variant_formats_code_as_hex() {
        let err = PlatformError::Win32 {
            function: "RegisterClassExW",
            code: 0x0000_0057,
        };
        assert_eq!(err.to_string(), "RegisterClassExW failed (error 0x00000057)");
    }
}
