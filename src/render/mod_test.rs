use super::*;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

fn render(options: RenderOptions, f: impl FnOnce(&mut Printer<Vec<u8>>)) -> String {
    let mut printer = Printer::new(Vec::new(), options);
    f(&mut printer);
    String::from_utf8(printer.into_inner()).unwrap()
}

#[test]
fn banner_shows_greeting_and_examples() {
    let session = ChatSession::new();
    let out = render(RenderOptions::default(), |p| p.banner(&session).unwrap());

    assert!(out.starts_with("AI Financial Analyst\n"));
    assert!(out.contains("[analyst]\nHello! I'm your AI Financial Analyst."));
    assert!(out.contains("Try an example:"));
    assert!(out.contains("/example 1  Get Latest Earnings for NVIDIA (NVDA)"));
    assert!(out.contains("/example 2  Show Stock Chart for Apple (AAPL)"));
}

#[test]
fn banner_hides_examples_after_first_question() {
    let mut session = ChatSession::new();
    session.begin_turn("hi").unwrap();
    let out = render(RenderOptions::default(), |p| p.banner(&session).unwrap());
    assert!(!out.contains("Try an example:"));
}

#[test]
fn assistant_markdown_is_rendered() {
    let message = Message::assistant("**Buy** rating");
    let out = render(RenderOptions::default(), |p| p.message(1, &message).unwrap());
    assert_eq!(out, "[analyst]\nBuy rating\n\n");
}

#[test]
fn raw_mode_prints_markdown_verbatim() {
    let message = Message::assistant("**Buy** rating\n");
    let options = RenderOptions { raw: true, ..RenderOptions::default() };
    let out = render(options, |p| p.message(1, &message).unwrap());
    assert_eq!(out, "[analyst]\n**Buy** rating\n\n");
}

#[test]
fn user_messages_are_labelled() {
    let out = render(RenderOptions::default(), |p| p.message(1, &Message::user("Price of AAPL?")).unwrap());
    assert_eq!(out, "[you] Price of AAPL?\n\n");
}

#[test]
fn chart_without_directory_reports_size() {
    let message = Message::assistant("Chart").with_chart(Some(STANDARD.encode([1_u8, 2, 3, 4])));
    let out = render(RenderOptions::default(), |p| p.message(2, &message).unwrap());
    assert!(out.contains("[chart image: 4 bytes; pass --chart-dir to save it]"));
}

#[test]
fn chart_with_directory_is_saved() {
    let tmp = tempfile::tempdir().unwrap();
    let message = Message::assistant("Chart").with_chart(Some(STANDARD.encode(b"\x89PNG\r\n\x1a\nbody")));
    let options = RenderOptions { chart_dir: Some(tmp.path().to_path_buf()), raw: false };

    let out = render(options, |p| p.message(6, &message).unwrap());

    let path = tmp.path().join("chart-006.png");
    assert!(out.contains(&format!("[chart saved to {}]", path.display())));
    assert!(path.exists());
}

#[test]
fn undecodable_chart_is_reported_not_fatal() {
    let message = Message::assistant("Chart").with_chart(Some("%%%".into()));
    let out = render(RenderOptions::default(), |p| p.message(2, &message).unwrap());
    assert!(out.contains("[chart image is not valid base64"));
    assert!(out.starts_with("[analyst]\nChart\n"));
}

#[test]
fn transcript_prints_every_message() {
    let mut session = ChatSession::new();
    session.begin_turn("q1").unwrap();
    session.finish_turn(Ok(crate::analyst::ChatReply { text_response: "a1".into(), chart_image: None }));

    let out = render(RenderOptions::default(), |p| p.transcript(&session).unwrap());
    let greeting = out.find("Hello!").unwrap();
    let question = out.find("[you] q1").unwrap();
    let answer = out.find("a1").unwrap();
    assert!(greeting < question && question < answer);
}

#[test]
fn empty_chart_is_ignored() {
    let tmp = tempfile::tempdir().unwrap();
    let options = RenderOptions { chart_dir: Some(tmp.path().to_path_buf()), raw: false };

    for encoded in ["", "  \n"] {
        let message = Message::assistant("No chart").with_chart(Some(encoded.into()));
        let out = render(options.clone(), |p| p.message(2, &message).unwrap());
        assert_eq!(out, "[analyst]\nNo chart\n\n");
    }
    assert!(!tmp.path().join("chart-002.png").exists());

    let message = Message::assistant("No chart").with_chart(Some(String::new()));
    let out = render(RenderOptions::default(), |p| p.message(2, &message).unwrap());
    assert!(!out.contains("chart image"));
}

#[test]
fn control_characters_are_stripped() {
    assert_eq!(sanitize_terminal_text("a\x1b[2Jb\x07c\r\n\td\u{9b}e"), "a[2Jbc\n\tde");

    let message = Message::assistant("Price \x1b]0;owned\x07up");
    let out = render(RenderOptions { raw: true, ..RenderOptions::default() }, |p| p.message(1, &message).unwrap());
    assert_eq!(out, "[analyst]\nPrice ]0;ownedup\n\n");

    let out = render(RenderOptions::default(), |p| p.message(1, &Message::user("hi\x1b[31m")).unwrap());
    assert_eq!(out, "[you] hi[31m\n\n");
}

#[test]
fn transcript_does_not_rewrite_saved_charts() {
    let tmp = tempfile::tempdir().unwrap();
    let options = RenderOptions { chart_dir: Some(tmp.path().to_path_buf()), raw: false };
    let mut session = ChatSession::new();
    session.begin_turn("chart AAPL").unwrap();
    session.finish_turn(Ok(crate::analyst::ChatReply {
        text_response: "Chart".into(),
        chart_image: Some(STANDARD.encode(b"\x89PNG\r\n\x1a\nbody")),
    }));

    let mut printer = Printer::new(Vec::new(), options);
    printer.message(2, &session.messages()[2]).unwrap();
    let path = tmp.path().join("chart-002.png");
    std::fs::write(&path, b"edited").unwrap();

    printer.transcript(&session).unwrap();
    let out = String::from_utf8(printer.into_inner()).unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), b"edited");
    assert!(out.contains(&format!("[chart at {}]", path.display())));
}
