use encoding_rs::{EUC_JP, SHIFT_JIS};
use zenn_reader::encoding::transcode_to_utf8;
use zenn_reader::extract_bytes;

fn page(charset: &str, text: &str) -> String {
    format!(r#"<html><head><meta charset="{charset}"><title>{text}</title></head><body><div class="znc"><p>{text}</p></div></body></html>"#)
}

#[test]
fn shift_jis_page_is_transcoded() {
    let html = page("Shift_JIS", "日本語の記事");
    let (bytes, _, had_errors) = SHIFT_JIS.encode(&html);
    assert!(!had_errors);

    match extract_bytes(&bytes, "") {
        Ok(article) => {
            assert_eq!(article.title, "日本語の記事");
            assert_eq!(article.content.as_str(), "日本語の記事");
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn euc_jp_page_is_transcoded() {
    let html = page("EUC-JP", "文字コード");
    let (bytes, _, _) = EUC_JP.encode(&html);
    let article = extract_bytes(&bytes, "").expect("extracts");
    assert_eq!(article.content.as_str(), "文字コード");
}

#[test]
fn utf8_bom_is_stripped() {
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(page("utf-8", "BOM付き").as_bytes());
    let article = extract_bytes(&bytes, "").expect("extracts");
    assert_eq!(article.title, "BOM付き");
}

#[test]
fn header_charset_beats_meta() {
    let html = "<html><head><meta charset=\"utf-8\"></head><body>カタカナ</body></html>";
    let (bytes, _, _) = SHIFT_JIS.encode(html);
    let text = transcode_to_utf8(&bytes, Some("text/html; charset=Shift_JIS"));
    assert!(text.contains("カタカナ"));
}

#[test]
fn undeclared_bytes_default_to_utf8() {
    let text = transcode_to_utf8("素のUTF-8".as_bytes(), None);
    assert_eq!(text, "素のUTF-8");
}

#[test]
fn invalid_bytes_are_replaced_not_rejected() {
    let text = transcode_to_utf8(&[b'a', 0xFF, b'b'], None);
    assert_eq!(text, "a\u{FFFD}b");
}
