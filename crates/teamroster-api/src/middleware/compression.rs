//! Response compression layer.

use tower_http::compression::CompressionLayer;

/// Gzip compression for responses; page bodies can reach thousands of rows.
pub fn build_compression_layer() -> CompressionLayer {
    CompressionLayer::new().gzip(true)
}
