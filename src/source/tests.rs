use super::*;

#[test]
fn test_empty_document_yields_empty_text() {
    assert_eq!(DocumentTextSource.extract_text(&[]), "");
}

#[test]
fn test_plain_text_passthrough() {
    let doc = "1. What is 2+2?\n2. Name a mammal.".as_bytes();
    assert_eq!(DocumentTextSource.extract_text(doc), "1. What is 2+2?\n2. Name a mammal.");
}

#[test]
fn test_invalid_utf8_yields_empty_text() {
    let doc = [0xff, 0xfe, 0x00, 0x81, 0x9c];
    assert_eq!(DocumentKind::sniff(&doc), DocumentKind::Unknown);
    assert_eq!(DocumentTextSource.extract_text(&doc), "");
}

#[test]
fn test_malformed_pdf_yields_empty_text() {
    let doc = b"%PDF-1.7\nthis is not really a pdf";
    assert_eq!(DocumentKind::sniff(doc), DocumentKind::Pdf);
    assert_eq!(DocumentTextSource.extract_text(doc), "");
}

#[test]
fn test_sniff_plain_text() {
    assert_eq!(DocumentKind::sniff("héllo".as_bytes()), DocumentKind::PlainText);
}

mod ocr_tests {
    use crate::source::ocr::{
        MAX_OCR_PIXELS, MIN_PAGE_TEXT_CHARS, merge_pages, needs_ocr, render_size,
        within_pixel_budget,
    };

    #[test]
    fn test_thin_pages_need_ocr() {
        assert!(needs_ocr(""));
        assert!(needs_ocr(&"x".repeat(MIN_PAGE_TEXT_CHARS - 1)));
        assert!(!needs_ocr(&"x".repeat(MIN_PAGE_TEXT_CHARS)));
        // counted in characters, not bytes
        assert!(needs_ocr(&"é".repeat(MIN_PAGE_TEXT_CHARS - 1)));
    }

    #[test]
    fn test_letter_page_fits_budget() {
        let (width, height) = render_size(612.0, 792.0);
        assert_eq!((width, height), (1700, 2200));
        assert!(within_pixel_budget(width, height));
    }

    #[test]
    fn test_oversized_render_is_skipped() {
        assert!(within_pixel_budget(3000, 4000));
        assert!(!within_pixel_budget(3000, 4001));
        assert_eq!(MAX_OCR_PIXELS, 12_000_000);

        let (width, height) = render_size(2000.0, 2000.0);
        assert!(!within_pixel_budget(width, height));
    }

    #[test]
    fn test_merge_ocrs_only_thin_pages() {
        let dense = "1. Which planet is closest to the sun? Explain your reasoning.".to_string();
        let mut ocr_calls = Vec::new();

        let text = merge_pages(
            vec![dense.clone(), "  scan  ".to_string(), String::new()],
            |index| {
                ocr_calls.push(index);
                format!("  ocr page {index}  ")
            },
        );

        assert_eq!(ocr_calls, vec![1, 2]);
        assert_eq!(text, format!("{dense}\nocr page 1\nocr page 2"));
    }

    #[test]
    fn test_failed_ocr_degrades_to_empty_page() {
        let text = merge_pages(vec![String::new(), String::new()], |_| String::new());
        assert_eq!(text, "");
    }
}
