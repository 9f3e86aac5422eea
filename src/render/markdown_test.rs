use super::*;

#[test]
fn plain_text_passes_through() {
    assert_eq!(render_markdown("NVDA closed at 120.5 today."), "NVDA closed at 120.5 today.");
}

#[test]
fn heading_is_underlined_and_emphasis_dropped() {
    let rendered = render_markdown("# Summary\n\nRevenue was **up 12%** on *strong* demand.");
    assert_eq!(rendered, "Summary\n=======\n\nRevenue was up 12% on strong demand.");
}

#[test]
fn subheadings_use_dashes() {
    let rendered = render_markdown("## Risks");
    assert_eq!(rendered, "Risks\n-----");
}

#[test]
fn bullet_and_numbered_lists() {
    let rendered = render_markdown("Highlights:\n\n- Revenue\n- Margin\n\n1. Buy\n2. Hold\n");
    assert_eq!(rendered, "Highlights:\n\n- Revenue\n- Margin\n\n1. Buy\n2. Hold");
}

#[test]
fn nested_lists_are_indented() {
    let rendered = render_markdown("- Tech\n  - NVDA\n  - AAPL\n- Energy\n");
    assert_eq!(rendered, "- Tech\n  - NVDA\n  - AAPL\n- Energy");
}

#[test]
fn code_is_marked() {
    let rendered = render_markdown("Use `AAPL` as ticker.\n\n```\nprice = 190\n```\n");
    assert_eq!(rendered, "Use `AAPL` as ticker.\n\n    price = 190");
}

#[test]
fn links_show_their_target() {
    let rendered = render_markdown("See [the filing](https://sec.gov/x) for details.");
    assert_eq!(rendered, "See the filing (https://sec.gov/x) for details.");
}

#[test]
fn autolinks_are_not_repeated() {
    let rendered = render_markdown("<https://sec.gov/x>");
    assert_eq!(rendered, "https://sec.gov/x");
}

#[test]
fn raw_html_is_dropped() {
    let rendered = render_markdown("Price <b>up</b>\n\n<script>alert(1)</script>\n\nDone.");
    assert!(!rendered.contains("<b>"));
    assert!(!rendered.contains("script"));
    assert!(rendered.contains("Price up"));
    assert!(rendered.ends_with("Done."));
}

#[test]
fn tables_are_pipe_separated() {
    let rendered = render_markdown("| Ticker | Price |\n|---|---|\n| AAPL | 190 |\n| NVDA | 120 |\n");
    assert_eq!(rendered, "Ticker | Price\nAAPL | 190\nNVDA | 120");
}

#[test]
fn empty_input_renders_empty() {
    assert_eq!(render_markdown(""), "");
}
