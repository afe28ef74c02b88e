use super::*;

fn png_bytes(len: usize) -> Vec<u8> {
    vec![0x89; len]
}

#[test]
fn test_image_item_wins_over_html_and_text() {
    let event = PasteEvent::default()
        .with_html("<p>caption</p>")
        .with_text("caption")
        .with_image("image/png", png_bytes(16));

    let decision = classify(&event);

    assert!(decision.prevent_default);
    match decision.route {
        PasteRoute::Image(file) => {
            assert_eq!(file.mime_type, "image/png");
            assert_eq!(file.name, "image.png");
            assert_eq!(file.size(), 16);
        }
        other => panic!("Expected Image route, got {:?}", other),
    }
}

#[test]
fn test_image_item_without_data_falls_through() {
    let event = PasteEvent::default()
        .with_item(ClipboardItem::unavailable("image/png"))
        .with_text("hello");

    let decision = classify(&event);

    assert_eq!(decision.route, PasteRoute::PlainText("hello".to_string()));
}

#[test]
fn test_html_wins_over_plain_text() {
    let event = PasteEvent::default()
        .with_text("Title")
        .with_html("<h1>Title</h1>");

    let decision = classify(&event);

    assert!(decision.prevent_default);
    assert_eq!(
        decision.route,
        PasteRoute::Html {
            html: "<h1>Title</h1>".to_string(),
            plain_fallback: Some("Title".to_string()),
        }
    );
}

#[test]
fn test_blank_html_is_not_usable() {
    let event = PasteEvent::default().with_html("  \n ").with_text("text");

    let decision = classify(&event);

    assert_eq!(decision.route, PasteRoute::PlainText("text".to_string()));
}

#[test]
fn test_image_url_text_routes_to_remote_image() {
    let event = PasteEvent::default().with_text("https://example.com/cat.webp?size=large");

    let decision = classify(&event);

    assert!(decision.prevent_default);
    assert_eq!(
        decision.route,
        PasteRoute::RemoteImage("https://example.com/cat.webp?size=large".to_string())
    );
}

#[test]
fn test_plain_text_is_passed_through_verbatim() {
    let text = "  some **markdown**\n\nwith https://example.com/page.html ";
    let event = PasteEvent::default().with_text(text);

    let decision = classify(&event);

    assert_eq!(decision.route, PasteRoute::PlainText(text.to_string()));
}

#[test]
fn test_empty_event_is_ignored() {
    let decision = classify(&PasteEvent::default());

    assert_eq!(decision.route, PasteRoute::Ignore);
    assert!(!decision.prevent_default);
}

#[test]
fn test_empty_plain_text_is_ignored() {
    let decision = classify(&PasteEvent::default().with_text(""));

    assert_eq!(decision.route, PasteRoute::Ignore);
}

#[test]
fn test_is_image_url_accepts_known_extensions() {
    assert!(is_image_url("http://example.com/a.jpg"));
    assert!(is_image_url("https://example.com/a.JPEG"));
    assert!(is_image_url("https://example.com/dir/a.png?x=1&y=2"));
    assert!(is_image_url("HTTPS://EXAMPLE.COM/A.GIF"));
    assert!(is_image_url("https://example.com/a.webp"));
}

#[test]
fn test_is_image_url_rejects_other_text() {
    assert!(!is_image_url("ftp://example.com/a.png"));
    assert!(!is_image_url("https://example.com/a.svg"));
    assert!(!is_image_url("https://example.com/a.png#frag"));
    assert!(!is_image_url("see https://example.com/a.png"));
    assert!(!is_image_url("https://example.com/a.png\nmore"));
    assert!(!is_image_url("example.com/a.png"));
}

#[test]
fn test_paste_event_accessors() {
    let event = PasteEvent::default()
        .with_html("<b>x</b>")
        .with_text("x");

    assert_eq!(event.html(), Some("<b>x</b>"));
    assert_eq!(event.plain_text(), Some("x"));
    assert!(!event.is_empty());
}
