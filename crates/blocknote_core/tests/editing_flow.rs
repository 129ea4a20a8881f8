use blocknote_core::seed::demo_workspace;
use blocknote_core::{
    BlockCommand, BlockRepository, BlockService, DueDate, InMemoryOrderRepository,
    OrderKey, OrderRepository, Priority, QueryService,
};

#[test]
fn edits_in_a_collection_show_up_in_the_today_view() {
    let (mut blocks, _) = demo_workspace().into_repositories();
    let mut orders = InMemoryOrderRepository::new();

    {
        let mut editor = BlockService::new(&mut blocks);
        let added = editor.add_block("learning", None).unwrap();
        let edited = editor
            .edit_content("learning", &added.id, "[ ] read chapter 3 !p2 ^today #study")
            .unwrap();
        assert_eq!(edited.content, "read chapter 3 !p2 ^today #study");
        assert_eq!(edited.priority, Priority::P2);
        assert_eq!(edited.date, Some(DueDate::Today));
    }

    let mut queries = QueryService::new(&mut blocks, &mut orders);
    let results = queries.today_tasks().unwrap();
    let last = results.last().unwrap();
    assert_eq!(last.origin, "learning");
    assert!(last.block.has_tag("study"));
}

#[test]
fn reordered_today_view_keeps_order_after_checking_a_task() {
    let (mut blocks, _) = demo_workspace().into_repositories();
    let mut orders = InMemoryOrderRepository::new();
    let mut queries = QueryService::new(&mut blocks, &mut orders);

    let shown: Vec<String> = queries
        .today_tasks()
        .unwrap()
        .iter()
        .map(|item| item.block.id.clone())
        .collect();
    queries
        .reorder(&OrderKey::Today, &shown, "fitness-task1", "block4")
        .unwrap()
        .unwrap();

    let results = queries.today_tasks().unwrap();
    let personal = results
        .iter()
        .find(|item| item.id() == "personal-task1")
        .unwrap()
        .clone();
    queries.toggle_surfaced(&personal).unwrap();

    let ids: Vec<String> = queries
        .today_tasks()
        .unwrap()
        .into_iter()
        .map(|item| item.block.id)
        .collect();
    assert_eq!(
        ids,
        vec!["fitness-task1", "block4", "work-task1", "personal-task1"]
    );

    let stored = blocks
        .get_block("personal", "personal-task1")
        .unwrap()
        .unwrap();
    assert_eq!(stored.checked(), Some(true));
    assert_eq!(orders.get_order(&OrderKey::Today).unwrap(), Some(ids));
}

#[test]
fn converting_a_block_into_a_query_block_makes_it_evaluable() {
    let (mut blocks, _) = demo_workspace().into_repositories();
    let mut orders = InMemoryOrderRepository::new();

    let query_id = {
        let mut editor = BlockService::new(&mut blocks);
        let added = editor.add_block("finance", None).unwrap();
        editor
            .apply_command("finance", &added.id, BlockCommand::Query, None)
            .unwrap();
        added.id
    };

    let mut queries = QueryService::new(&mut blocks, &mut orders);
    let results = queries.query_block_results(&query_id).unwrap();
    let ids: Vec<&str> = results.iter().map(|item| item.id()).collect();
    assert_eq!(
        ids,
        vec!["block4", "work-task1", "personal-task1", "fitness-task1"]
    );
}
