//! The seam between the ledger and an external receipt OCR provider.

use std::fmt::Debug;

use async_trait::async_trait;
use axum::body::Bytes;

use crate::Error;

/// An uploaded receipt image.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptImage {
    /// The MIME type of the image, e.g. "image/png".
    pub content_type: String,
    /// The raw image data.
    pub bytes: Bytes,
}

/// Something that can read a receipt image.
///
/// Implementations send the image to an OCR provider and return the
/// provider's raw text response, which is then interpreted by
/// [parse_receipt_response](crate::receipt::parse_receipt_response).
#[async_trait]
pub trait ReceiptScanner: Send + Sync + Debug {
    /// Scan `image` and return the provider's raw response.
    ///
    /// # Errors
    /// Returns [Error::ReceiptScan] if the provider cannot be reached or
    /// rejects the image.
    async fn scan(&self, image: ReceiptImage) -> Result<String, Error>;
}

/// The scanner used when no OCR provider has been configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredReceiptScanner;

#[async_trait]
impl ReceiptScanner for UnconfiguredReceiptScanner {
    async fn scan(&self, image: ReceiptImage) -> Result<String, Error> {
        tracing::warn!(
            "rejecting {} byte receipt, no receipt scanner is configured",
            image.bytes.len()
        );
        Err(Error::ReceiptScan("no receipt scanner configured".to_owned()))
    }
}
