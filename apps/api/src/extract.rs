//! Document Text Extractor — plain text from an optional strategy PDF.

use crate::errors::AppError;

/// Sentinel used when the caller supplies no strategy document. Sent to the
/// model in place of extracted text so the prompt shape stays constant.
pub const NO_DOCUMENT_SENTINEL: &str =
    "No strategy document provided; base the diagnosis on the stated needs only.";

/// Extracts plain text from an optional PDF, in page order.
///
/// No document → the fixed sentinel. A document with zero extractable pages
/// yields an empty string, not an error. An unreadable document aborts the
/// flow with `AppError::Extraction` — silently dropping uploaded strategy
/// content would skew the diagnosis. Single pass, no retries.
pub fn extract_strategy_text(document: Option<&[u8]>) -> Result<String, AppError> {
    let Some(bytes) = document else {
        return Ok(NO_DOCUMENT_SENTINEL.to_string());
    };

    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::Extraction(format!("could not read the strategy PDF: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_document_returns_sentinel() {
        let text = extract_strategy_text(None).unwrap();
        assert_eq!(text, NO_DOCUMENT_SENTINEL);
    }

    #[test]
    fn test_unreadable_document_is_an_extraction_error() {
        let result = extract_strategy_text(Some(b"this is not a pdf"));
        assert!(matches!(result, Err(AppError::Extraction(_))));
    }

    /// Structurally valid PDF whose page tree is empty. Offsets are computed
    /// while assembling so the xref table stays correct.
    fn zero_page_pdf() -> Vec<u8> {
        let mut pdf = Vec::new();
        let mut offsets = Vec::new();

        pdf.extend_from_slice(b"%PDF-1.4\n");
        offsets.push(pdf.len());
        pdf.extend_from_slice(b"1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");
        offsets.push(pdf.len());
        pdf.extend_from_slice(b"2 0 obj\n<< /Type /Pages /Kids [] /Count 0 >>\nendobj\n");

        let xref = pdf.len();
        pdf.extend_from_slice(b"xref\n0 3\n0000000000 65535 f \n");
        for offset in offsets {
            pdf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        pdf.extend_from_slice(b"trailer\n<< /Size 3 /Root 1 0 R >>\nstartxref\n");
        pdf.extend_from_slice(format!("{xref}\n").as_bytes());
        pdf.extend_from_slice(b"%%EOF\n");
        pdf
    }

    #[test]
    fn test_zero_extractable_pages_yields_empty_string() {
        let text = extract_strategy_text(Some(&zero_page_pdf())).unwrap();
        assert_eq!(text, "");
    }
}
