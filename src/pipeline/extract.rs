//! PDF text extraction via pdfium.
//!
//! pdfium is blocking C++ code with thread-local state, so extraction runs
//! inside `tokio::task::spawn_blocking`. An unreadable document is not a hard
//! failure: the error is logged and the text comes back empty, which the
//! caller reports as too little text.

use crate::error::ExtractionError;
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::{debug, info, warn};

/// Path to a pdfium shared library; the system library is used when unset.
pub const PDFIUM_LIB_PATH_ENV: &str = "PDFIUM_LIB_PATH";

/// Text of every page, joined with newlines and trimmed.
///
/// Returns an empty string when the bytes cannot be read as a PDF.
pub async fn extract_text(bytes: Vec<u8>) -> String {
    let joined = tokio::task::spawn_blocking(move || extract_text_blocking(&bytes)).await;

    match joined {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("PDF extraction error: {}", e);
            String::new()
        }
        Err(e) => {
            warn!("PDF extraction task panicked: {}", e);
            String::new()
        }
    }
}

fn extract_text_blocking(bytes: &[u8]) -> Result<String, ExtractionError> {
    let pdfium = bind_pdfium()?;
    let document = pdfium
        .load_pdf_from_byte_slice(bytes, None)
        .map_err(|e| ExtractionError::Open(format!("{:?}", e)))?;

    let pages = document.pages();
    info!("PDF loaded: {} pages", pages.len());

    let mut texts = Vec::with_capacity(pages.len() as usize);
    for (idx, page) in pages.iter().enumerate() {
        let text = page.text().map_err(|e| ExtractionError::PageText {
            page: idx + 1,
            detail: format!("{:?}", e),
        })?;
        let page_text = text.all();
        debug!("Page {}: {} chars", idx + 1, page_text.chars().count());
        texts.push(page_text);
    }

    Ok(texts.join("\n").trim().to_string())
}

fn bind_pdfium() -> Result<Pdfium, ExtractionError> {
    let bindings = match std::env::var(PDFIUM_LIB_PATH_ENV) {
        Ok(path) if !path.is_empty() => Pdfium::bind_to_library(&path)
            .map_err(|e| ExtractionError::Bind(format!("{path}: {e:?}")))?,
        _ => Pdfium::bind_to_system_library()
            .map_err(|e| ExtractionError::Bind(format!("system library: {e:?}")))?,
    };
    Ok(Pdfium::new(bindings))
}

/// Case-insensitive `.pdf` extension check.
pub fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}
