//! Integration tests for the high-level conversion API.

use plainpdf::api::{convert_file, render_text, Pdf, PdfBuilder};
use plainpdf::config::{EncodingPolicy, LayoutConfig, PageSize};
use plainpdf::xref::{check_file, parse_document_structure};
use plainpdf::Error;
use regex::bytes::Regex;
use tempfile::tempdir;

fn as_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).to_string()
}

mod hello_world_tests {
    use super::*;

    const HELLO_WORLD_PDF: &str = "%PDF-1.4\n\
5 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>\nendobj\n\
3 0 obj\n<< /Length 51 >>\nstream\nBT\n/F1 11 Tf\n72 720 Td\n(Hello world) Tj\n0 -14 Td\nET\nendstream\nendobj\n\
4 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Resources << /Font << /F1 5 0 R >> >> /Contents 3 0 R >>\nendobj\n\
2 0 obj\n<< /Type /Pages /Count 1 /Kids [4 0 R] >>\nendobj\n\
1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n\
xref\n\
0 6\n\
0000000000 65535 f \n\
0000000363 00000 n \n\
0000000306 00000 n \n\
0000000079 00000 n \n\
0000000180 00000 n \n\
0000000009 00000 n \n\
trailer\n\
<< /Size 6 /Root 1 0 R >>\n\
startxref\n\
412\n\
%%EOF\n";

    #[test]
    fn test_hello_world_is_byte_exact() {
        let bytes = render_text("Hello world", &LayoutConfig::default()).unwrap();
        assert_eq!(as_text(&bytes), HELLO_WORLD_PDF);
    }

    #[test]
    fn test_hello_world_structure() {
        let bytes = render_text("Hello world", &LayoutConfig::default()).unwrap();
        let text = as_text(&bytes);

        assert_eq!(text.matches(" Tj").count(), 1);
        assert!(text.contains("(Hello world) Tj"));
        assert!(text.contains("trailer\n<< /Size 6 /Root 1 0 R >>\n"));

        let structure = parse_document_structure(&bytes).unwrap();
        assert_eq!(structure.entries.len(), 6);
        assert_eq!(structure.object_count(), 5);
        assert_eq!(structure.size, 6);
        assert_eq!(structure.root.id, 1);
    }
}

mod layout_tests {
    use super::*;

    #[test]
    fn test_blank_lines_are_laid_out() {
        let bytes = render_text("a\n\nb", &LayoutConfig::default()).unwrap();
        let text = as_text(&bytes);
        assert!(text.contains("(a) Tj\n0 -14 Td\n() Tj\n0 -14 Td\n(b) Tj"));
    }

    #[test]
    fn test_carriage_return_splits_lines() {
        let bytes = render_text("a\rb", &LayoutConfig::default()).unwrap();
        let text = as_text(&bytes);
        assert_eq!(text.matches(" Tj").count(), 2);
        assert!(text.contains("(a) Tj\n0 -14 Td\n(b) Tj"));
        assert!(!text.contains('\r'));
    }

    #[test]
    fn test_long_word_is_not_split() {
        let word = "x".repeat(120);
        let bytes = render_text(&format!("short {} tail", word), &LayoutConfig::default()).unwrap();
        let text = as_text(&bytes);
        assert!(text.contains(&format!("({}) Tj", word)));
        assert!(text.contains("(short) Tj"));
        assert!(text.contains("(tail) Tj"));
    }

    #[test]
    fn test_parentheses_and_backslashes_escaped() {
        let bytes = render_text(r"f(x) = \alpha", &LayoutConfig::default()).unwrap();
        assert!(as_text(&bytes).contains(r"(f\(x\) = \\alpha) Tj"));
    }

    #[test]
    fn test_latin1_bytes_are_written_raw() {
        let bytes = render_text("café", &LayoutConfig::default()).unwrap();
        let needle = [b'(', b'c', b'a', b'f', 0xE9, b')'];
        assert!(bytes.windows(needle.len()).any(|w| w == needle));
        parse_document_structure(&bytes).unwrap();
    }

    #[test]
    fn test_stream_length_counts_bytes() {
        let bytes = render_text("é(", &LayoutConfig::default()).unwrap();
        let re = Regex::new(r"(?s-u)<< /Length (\d+) >>\nstream\n(.*?)\nendstream").unwrap();
        let caps = re.captures(&bytes).unwrap();
        let declared: usize = std::str::from_utf8(&caps[1]).unwrap().parse().unwrap();
        assert_eq!(declared, caps[2].len());
    }
}

mod pagination_tests {
    use super::*;

    fn numbered_lines(n: usize) -> String {
        (1..=n).map(|i| format!("line {}", i)).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn test_page_break_after_46_lines() {
        let pdf = Pdf::from_text(&numbered_lines(47)).unwrap();
        assert_eq!(pdf.page_count(), 2);

        let text = as_text(pdf.as_bytes());
        assert!(text.contains("/Count 2 /Kids [4 0 R 7 0 R]"));
        // Second page holds exactly the 47th line
        let re = regex::Regex::new(r"6 0 obj\n<< /Length \d+ >>\nstream\n([^\x00]*?)\nendstream").unwrap();
        let second = &re.captures(&text).unwrap()[1];
        assert_eq!(second.matches(" Tj").count(), 1);
        assert!(second.contains("(line 47) Tj"));
    }

    #[test]
    fn test_each_page_references_own_content() {
        let pdf = Pdf::from_text(&numbered_lines(200)).unwrap();
        assert_eq!(pdf.page_count(), 5);
        let text = as_text(pdf.as_bytes());

        let re = regex::Regex::new(r"(\d+) 0 obj\n<< /Type /Page /Parent 2 0 R .*? /Contents (\d+) 0 R >>").unwrap();
        let pairs: Vec<(u32, u32)> = re
            .captures_iter(&text)
            .map(|c| (c[1].parse().unwrap(), c[2].parse().unwrap()))
            .collect();
        assert_eq!(pairs, vec![(4, 3), (7, 6), (9, 8), (11, 10), (13, 12)]);
        assert!(text.contains("/Kids [4 0 R 7 0 R 9 0 R 11 0 R 13 0 R]"));

        let structure = parse_document_structure(pdf.as_bytes()).unwrap();
        assert_eq!(structure.size, 14);
        assert_eq!(structure.object_count(), 13);
    }

    #[test]
    fn test_empty_input_still_valid() {
        let bytes = render_text("", &LayoutConfig::default()).unwrap();
        let structure = parse_document_structure(&bytes).unwrap();
        assert_eq!(structure.size, 6);
        assert_eq!(structure.object_count(), 3);
        assert!(as_text(&bytes).contains("0000000003 65535 f \n"));
    }

    #[test]
    fn test_custom_layout_changes_capacity() {
        let pdf = PdfBuilder::new()
            .page_size(PageSize::Legal)
            .line_height(12.0)
            .from_text(&numbered_lines(72))
            .unwrap();
        // (1008 - 144) / 12 = 72
        assert_eq!(pdf.page_count(), 1);
    }
}

mod error_tests {
    use super::*;

    #[test]
    fn test_zero_lines_per_page_fails_fast() {
        let config = LayoutConfig::new().with_margin(396.0);
        assert!(matches!(render_text("text", &config), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_non_finite_layout_is_rejected() {
        let mut config = LayoutConfig::default();
        config.page_height = f64::INFINITY;
        assert!(matches!(render_text("text", &config), Err(Error::Configuration(_))));

        let mut config = LayoutConfig::default();
        config.margin_left = f64::NAN;
        assert!(matches!(render_text("text", &config), Err(Error::Configuration(_))));

        let config = LayoutConfig::default().with_page_size(PageSize::Custom(1e20, 792.0));
        assert!(matches!(render_text("text", &config), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_unencodable_character_fails() {
        let err = render_text("plain\nemoji 🙂 here", &LayoutConfig::default()).unwrap_err();
        match err {
            Error::Encoding {
                character,
                line,
                column,
            } => {
                assert_eq!(character, '🙂');
                assert_eq!(line, 2);
                assert_eq!(column, 7);
            },
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_replacement_policy() {
        let config = LayoutConfig::new().with_encoding(EncodingPolicy::Replace);
        let bytes = render_text("emoji 🙂 here", &config).unwrap();
        assert!(as_text(&bytes).contains("(emoji ? here) Tj"));
    }
}

mod file_tests {
    use super::*;

    #[test]
    fn test_convert_file_round_trip() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("notes.md");
        let output = dir.path().join("notes.pdf");
        std::fs::write(&input, "# Title\n\nSome *markdown* stays literal.\n").unwrap();

        let summary = convert_file(&input, &output, &LayoutConfig::default()).unwrap();
        assert_eq!(summary.lines, 3);
        assert_eq!(summary.pages, 1);

        let written = std::fs::read(&output).unwrap();
        assert_eq!(written.len(), summary.bytes);
        assert!(as_text(&written).contains("(# Title) Tj"));
        assert!(as_text(&written).contains("(Some *markdown* stays literal.) Tj"));

        let structure = check_file(&output).unwrap();
        assert_eq!(structure.object_count(), summary.objects);
    }

    #[test]
    fn test_missing_input_is_io_error() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("out.pdf");
        let err = convert_file(dir.path().join("nope.txt"), &output, &LayoutConfig::default())
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_encoding_failure_writes_no_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("arrows.txt");
        let output = dir.path().join("arrows.pdf");
        std::fs::write(&input, "left ← right").unwrap();

        let err = convert_file(&input, &output, &LayoutConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Encoding { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_invalid_utf8_input_is_rejected() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("latin1.txt");
        let output = dir.path().join("latin1.pdf");
        std::fs::write(&input, [b'c', b'a', b'f', 0xE9]).unwrap();

        assert!(matches!(
            convert_file(&input, &output, &LayoutConfig::default()),
            Err(Error::Io(_))
        ));
        assert!(!output.exists());
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let pdf = Pdf::from_text("x").unwrap();
        assert!(pdf.save(dir.path().join("missing").join("out.pdf")).is_err());
    }
}
