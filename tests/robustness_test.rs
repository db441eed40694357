use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rs_maintext::{extract, extract_with_cancel, extract_with_options, Error, Options};

fn nested_divs(depth: usize, inner: &str) -> String {
    format!("{}{inner}{}", "<div>".repeat(depth), "</div>".repeat(depth))
}

#[test]
fn extract_does_not_panic_on_malformed_html_unclosed_tags() {
    let html = "<p>text<div>more";
    match extract(html) {
        Ok(result) => {
            assert!(result.content_text.contains("text"));
            assert!(result.content_text.contains("more"));
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn extract_does_not_panic_on_malformed_html_invalid_nesting() {
    let result = extract("<p><div></p></div><table><td>cell</table></tr>");
    assert!(result.is_ok());
}

#[test]
fn extract_does_not_panic_on_broken_attributes() {
    let result = extract(r#"<div class="test id=broken colspan=><td colspan="abc" rowspan="-1">x"#);
    assert!(result.is_ok());
}

#[test]
fn extract_handles_empty_and_whitespace_input() {
    for html in ["", "   ", "\n\t\n", "<html></html>"] {
        match extract(html) {
            Ok(result) => {
                assert!(!result.has_content(), "{html:?} produced text");
                assert_eq!(result.image_count, 0);
            }
            Err(err) => panic!("expected Ok(_) for {html:?}, got Err({err:?})"),
        }
    }
}

#[test]
fn deep_nesting_fails_closed_with_max_depth_error() {
    let html = nested_divs(1_000, "deep text");
    match extract(&html) {
        Err(Error::MaxDepthExceeded { limit }) => assert_eq!(limit, 256),
        other => panic!("expected MaxDepthExceeded, got {other:?}"),
    }
}

#[test]
fn deep_nesting_within_a_raised_limit_succeeds() {
    let html = nested_divs(400, "deep text");
    let options = Options { max_depth: 1_000, ..Options::default() };
    match extract_with_options(&html, &options) {
        Ok(result) => assert_eq!(result.content_text, "deep text"),
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn oversized_input_is_rejected_before_parsing() {
    let options = Options { max_input_size: 1024, ..Options::default() };
    let html = format!("<p>{}</p>", "x".repeat(2048));
    match extract_with_options(&html, &options) {
        Err(Error::InputTooLarge { size, limit }) => {
            assert_eq!(size, html.len());
            assert_eq!(limit, 1024);
        }
        other => panic!("expected InputTooLarge, got {other:?}"),
    }
}

#[test]
fn elapsed_timeout_is_reported() {
    let options = Options { timeout: Some(Duration::ZERO), ..Options::default() };
    match extract_with_options("<article><p>text</p></article>", &options) {
        Err(Error::Timeout { limit }) => assert_eq!(limit, Some(Duration::ZERO)),
        other => panic!("expected Timeout, got {other:?}"),
    }
}

#[test]
fn timeout_interrupts_candidate_scoring_on_deep_input() {
    let html = nested_divs(2_000, "t");
    let options = Options {
        timeout: Some(Duration::ZERO),
        max_depth: 10_000,
        ..Options::default()
    };

    let started = Instant::now();
    let result = extract_with_options(&html, &options);
    let elapsed = started.elapsed();

    match result {
        Err(Error::Timeout { limit }) => assert_eq!(limit, Some(Duration::ZERO)),
        other => panic!("expected Timeout, got {other:?}"),
    }
    assert!(elapsed < Duration::from_secs(2), "took {elapsed:?}");
}

#[test]
fn timeout_covers_parsing_and_scoring_of_wide_input() {
    let html = format!("<body>{}</body>", "<div><p>text, more</p></div>".repeat(250_000));
    let options = Options {
        timeout: Some(Duration::from_millis(20)),
        ..Options::default()
    };
    match extract_with_options(&html, &options) {
        Err(Error::Timeout { .. }) => {}
        other => panic!("expected Timeout, got {other:?}"),
    }
}

#[test]
fn deep_input_fails_fast_with_default_options() {
    let html = nested_divs(2_000, "t");
    let started = Instant::now();
    let result = extract(&html);
    let elapsed = started.elapsed();

    assert!(matches!(result, Err(Error::MaxDepthExceeded { limit: 256 })), "{result:?}");
    assert!(elapsed < Duration::from_secs(5), "took {elapsed:?}");
}

#[test]
fn generous_timeout_does_not_interfere() {
    let options = Options { timeout: Some(Duration::from_secs(60)), ..Options::default() };
    let result = extract_with_options("<article><p>text</p></article>", &options);
    assert!(result.is_ok());
}

#[test]
fn raised_cancel_flag_stops_extraction() {
    let flag = Arc::new(AtomicBool::new(true));
    let result = extract_with_cancel("<article><p>text</p></article>", &Options::default(), flag);
    assert!(matches!(result, Err(Error::Timeout { .. })));
}

#[test]
fn unset_cancel_flag_is_harmless() {
    let flag = Arc::new(AtomicBool::new(false));
    let result = extract_with_cancel("<article><p>text</p></article>", &Options::default(), flag);
    assert!(result.is_ok());
}

#[test]
fn huge_colspan_is_capped() {
    let html = r#"<article><table><tr><td colspan="99999999">a</td></tr><tr><td>b</td></tr></table></article>"#;
    match extract(html) {
        Ok(result) => {
            let header = result.content_text.lines().next().unwrap_or_default();
            assert_eq!(header.matches(" |").count(), 1000);
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn unicode_text_survives() {
    let result = extract("<article><p>日本語のテキスト、カンマ付き。</p><p>Ünïcödé</p><p>🙂 emoji</p></article>").unwrap();
    assert!(result.content_text.contains("日本語のテキスト、カンマ付き。"));
    assert!(result.content_text.contains("Ünïcödé"));
    assert!(result.content_text.contains("🙂 emoji"));
}
