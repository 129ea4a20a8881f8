use blocknote_core::metadata::parser::has_any_date_marker;
use blocknote_core::{
    apply_input, display_content, parse_content, Block, BlockKind, DueDate, Priority,
};

#[test]
fn full_marker_line_parses_and_renders_clean() {
    let raw = "Ship v2 !P2 ^12.31.2023 #Work #release #work";
    let meta = parse_content(raw);
    assert_eq!(meta.priority, Priority::P2);
    assert_eq!(meta.date, Some(DueDate::On("12.31.2023".to_string())));
    assert_eq!(meta.tags, vec!["work".to_string(), "release".to_string()]);
    assert_eq!(display_content(raw), "Ship v2");
}

#[test]
fn relative_markers_win_over_formatted_dates() {
    let meta = parse_content("renew ^01.02.2024 ^Tomorrow");
    assert_eq!(meta.date, Some(DueDate::Tomorrow));
    assert!(has_any_date_marker("renew ^01.02.2024"));
    assert!(!has_any_date_marker("renew 01.02.2024"));
}

#[test]
fn multi_line_content_keeps_its_lines() {
    let raw = "groceries #home\n  milk   !p3\n\neggs ^today";
    assert_eq!(display_content(raw), "groceries\nmilk\n\neggs");
    assert_eq!(display_content(&display_content(raw)), display_content(raw));
}

#[test]
fn edit_without_markers_keeps_previous_metadata() {
    let mut block = Block::with_id("b", BlockKind::Text, "");
    block = apply_input(&block, "draft memo !p1 ^today #office");
    block = apply_input(&block, "final memo");

    assert_eq!(block.content, "final memo");
    assert_eq!(block.priority, Priority::P1);
    assert_eq!(block.date, Some(DueDate::Today));
    assert!(block.has_tag("office"));
}
