//! Barcode encoding for preview rendering.
//!
//! Uses the barcoders crate for Code 128, Code 39 and EAN-13 encoding.

use barcoders::sym::code39::Code39;
use barcoders::sym::code128::Code128;
use barcoders::sym::ean13::EAN13;

use crate::error::FolioError;
use crate::props::BarcodeKind;

/// Encode data as barcode modules.
/// Returns a Vec<bool> where true = bar (black), false = space (white).
pub fn encode(kind: BarcodeKind, data: &str) -> Result<Vec<bool>, FolioError> {
    // Code 128 needs a character set prefix; Set B (Ɓ) covers the widest
    // range of printable characters.
    let prefixed = format!("\u{0181}{}", data);
    let encoded = match kind {
        BarcodeKind::Code128 => Code128::new(&prefixed).map(|b| b.encode()),
        BarcodeKind::Code39 => Code39::new(data).map(|b| b.encode()),
        BarcodeKind::Ean13 => EAN13::new(data).map(|b| b.encode()),
    }
    .map_err(|e| FolioError::Provider(format!("{} encoding failed: {}", kind.name(), e)))?;

    Ok(encoded.into_iter().map(|module| module == 1).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code128_encoding() {
        let bars = encode(BarcodeKind::Code128, "Hello").unwrap();
        assert!(!bars.is_empty());
        assert!(bars.iter().any(|&b| b));
    }

    #[test]
    fn test_code39_encoding() {
        let bars = encode(BarcodeKind::Code39, "ABC-123").unwrap();
        assert!(bars.iter().any(|&b| b));
    }

    #[test]
    fn test_ean13_rejects_letters() {
        let err = encode(BarcodeKind::Ean13, "not digits").unwrap_err();
        assert!(err.to_string().contains("ean13"));
    }
}
