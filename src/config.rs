//! Process-wide limits and defaults.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Largest accepted upload body (~64 MiB).
pub const MAX_UPLOAD_BYTES: usize = 1 << 26;

/// Largest accepted image, in pixels (~32 megapixels).
pub const MAX_PIXELS: u64 = 1 << 25;

/// Address the service binds when none is given on the command line.
pub const DEFAULT_BIND: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8080);

/// Size limits applied to every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum upload body size in bytes
    pub max_upload_bytes: usize,
    /// Maximum `width * height` of a decoded image
    pub max_pixels: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_upload_bytes: MAX_UPLOAD_BYTES,
            max_pixels: MAX_PIXELS,
        }
    }
}
