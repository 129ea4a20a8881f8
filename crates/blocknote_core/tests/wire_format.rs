use blocknote_core::{
    Block, BlockKind, BlockStore, DateClass, DueDate, OrderKey, Priority, QueryCriteria,
    SearchQuery,
};
use serde_json::json;

#[test]
fn task_block_serializes_with_flat_type_tag() {
    let mut block = Block::with_id("b1", BlockKind::Task { checked: true }, "pay rent !p1");
    block.priority = Priority::P1;
    block.date = Some(DueDate::On("12.31.2023".to_string()));
    block.tags.insert("home".to_string());

    let value = serde_json::to_value(&block).unwrap();
    assert_eq!(
        value,
        json!({
            "id": "b1",
            "type": "task",
            "checked": true,
            "content": "pay rent !p1",
            "priority": "P1",
            "date": "12.31.2023",
            "tags": ["home"],
            "collapsed": false,
            "children": []
        })
    );

    let back: Block = serde_json::from_value(value).unwrap();
    assert_eq!(back, block);
}

#[test]
fn minimal_block_json_fills_defaults() {
    let block: Block = serde_json::from_value(json!({
        "id": "h",
        "type": "heading",
        "content": "Plans"
    }))
    .unwrap();
    assert_eq!(block.kind, BlockKind::Heading { level: 1 });
    assert_eq!(block.priority, Priority::None);
    assert!(block.date.is_none());
    assert!(block.tags.is_empty());
}

#[test]
fn query_block_embeds_criteria() {
    let block = Block::with_id("q", BlockKind::default_query(), "Custom Query");
    let value = serde_json::to_value(&block).unwrap();
    assert_eq!(value["type"], "query");
    assert_eq!(value["query"]["block_types"], json!(["task"]));
    assert_eq!(value["query"]["dates"], json!(["today"]));
    assert_eq!(value["show_title"], true);
}

#[test]
fn criteria_use_plain_string_values() {
    let criteria = QueryCriteria {
        priorities: vec![Priority::None, Priority::P2],
        dates: vec![DateClass::NoDate],
        ..QueryCriteria::default()
    };
    let value = serde_json::to_value(&criteria).unwrap();
    assert_eq!(value["priorities"], json!(["", "P2"]));
    assert_eq!(value["dates"], json!(["no date"]));

    let query: SearchQuery = serde_json::from_value(json!({ "date": "today" })).unwrap();
    assert_eq!(query.date, Some(DateClass::Today));
}

#[test]
fn order_keys_are_scoped() {
    assert_eq!(
        serde_json::to_value(OrderKey::SavedSearch("urgent".to_string())).unwrap(),
        json!({ "scope": "saved_search", "id": "urgent" })
    );
    assert_eq!(
        serde_json::to_value(OrderKey::Today).unwrap(),
        json!({ "scope": "today" })
    );
}

#[test]
fn store_keeps_collection_order() {
    let store = BlockStore::new()
        .with_collection("zeta", Vec::new())
        .with_collection("alpha", Vec::new());
    let text = serde_json::to_string(&store).unwrap();
    assert_eq!(text, r#"{"zeta":[],"alpha":[]}"#);

    let back: BlockStore = serde_json::from_str(&text).unwrap();
    let ids: Vec<&String> = back.collection_ids().collect();
    assert_eq!(ids, vec!["zeta", "alpha"]);
}
