//! Defines the endpoint that turns a receipt photo into a transaction suggestion.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Multipart, State, multipart::MultipartRejection},
    response::Response,
};

use crate::{
    AppState, Error,
    receipt::{ReceiptImage, ReceiptScanner, parse_receipt_response},
    response::success,
};

/// The largest receipt image accepted, in bytes.
pub const MAX_RECEIPT_BYTES: usize = 5 * 1024 * 1024;

/// The multipart field carrying the receipt image.
pub const RECEIPT_FIELD: &str = "receipt";

/// The state needed to scan receipts.
#[derive(Debug, Clone)]
pub struct ReceiptState {
    /// The OCR provider.
    pub receipt_scanner: Arc<dyn ReceiptScanner>,
}

impl FromRef<AppState> for ReceiptState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            receipt_scanner: state.receipt_scanner.clone(),
        }
    }
}

/// A route handler for scanning an uploaded receipt image.
///
/// Responds with a [ReceiptSuggestion](crate::receipt::ReceiptSuggestion), or
/// `null` if the image was not a receipt. Nothing is written to the ledger.
pub async fn scan_receipt_endpoint(
    State(state): State<ReceiptState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, Error> {
    let mut multipart = multipart.map_err(|rejection| Error::Invalid(rejection.body_text()))?;
    let image = read_receipt_image(&mut multipart).await?;

    tracing::debug!(
        "scanning {} byte receipt of type {}",
        image.bytes.len(),
        image.content_type
    );
    let text = state.receipt_scanner.scan(image).await?;
    let suggestion = parse_receipt_response(&text)?;

    Ok(success(suggestion))
}

async fn read_receipt_image(multipart: &mut Multipart) -> Result<ReceiptImage, Error> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|error| Error::Invalid(error.body_text()))?
    {
        if field.name() != Some(RECEIPT_FIELD) {
            continue;
        }

        let content_type = match field.content_type() {
            Some(content_type) if content_type.starts_with("image/") => content_type.to_owned(),
            other => {
                return Err(Error::Invalid(format!(
                    "receipt must be an image, got {}",
                    other.unwrap_or("no content type")
                )));
            }
        };

        let bytes = field.bytes().await.map_err(|error| {
            tracing::debug!("could not read receipt upload: {error}");
            Error::Invalid(error.body_text())
        })?;

        if bytes.len() > MAX_RECEIPT_BYTES {
            return Err(Error::Invalid(format!(
                "receipt must be at most {MAX_RECEIPT_BYTES} bytes"
            )));
        }

        return Ok(ReceiptImage {
            content_type,
            bytes,
        });
    }

    Err(Error::Invalid(format!(
        "missing multipart field \"{RECEIPT_FIELD}\""
    )))
}
