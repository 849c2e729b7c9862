//! End-to-end group command flow over the in-memory store.

use std::sync::Arc;

use groupbot_console::Dispatcher;
use groupbot_core::repositories::{GroupRepository, SystemRepository};
use groupbot_core::Group;
use groupbot_infrastructure::MemoryStore;

type ConsoleDispatcher = Dispatcher<MemoryStore, MemoryStore>;

fn setup() -> (Arc<MemoryStore>, ConsoleDispatcher) {
    let store = Arc::new(MemoryStore::new());
    let dispatcher = Dispatcher::new(store.clone(), store.clone(), "pk;");
    (store, dispatcher)
}

async fn register(dispatcher: &mut ConsoleDispatcher, store: &MemoryStore, name: &str) -> String {
    dispatcher.handle_line(&format!("system new {}", name)).await;
    let id = dispatcher.acting_system().expect("system registered");
    SystemRepository::find_by_id(store, id)
        .await
        .unwrap()
        .unwrap()
        .hid
        .to_string()
}

async fn only_group(store: &MemoryStore, dispatcher: &ConsoleDispatcher) -> Group {
    let id = dispatcher.acting_system().unwrap();
    let groups = store.query_groups_in_system(id).await.unwrap();
    assert_eq!(groups.len(), 1);
    groups.into_iter().next().unwrap()
}

#[tokio::test]
async fn test_full_group_lifecycle() {
    let (store, mut dispatcher) = setup();
    let owner_hid = register(&mut dispatcher, &store, "Stars").await;

    // Create
    let out = dispatcher.handle_line("pk;group new Alters").await;
    assert!(out[0].contains("Group \"**Alters**\""), "{:?}", out);
    let group = only_group(&store, &dispatcher).await;
    assert_eq!(group.name, "Alters");
    assert!(group.description.is_none());
    assert!(!group.hid.as_str().is_empty());
    let hid = group.hid.to_string();

    // Rename
    let out = dispatcher.handle_line(&format!("group {} rename Alts", hid)).await;
    assert!(out[0].contains("from \"**Alters**\" to \"**Alts**\""), "{:?}", out);
    assert_eq!(only_group(&store, &dispatcher).await.name, "Alts");

    // Set and show description
    let out = dispatcher.handle_line(&format!("group {} description Hello", hid)).await;
    assert!(out[0].contains("Group description changed."));
    let out = dispatcher.handle_line(&format!("group {} description", hid)).await;
    assert!(out[0].contains("Hello"));
    assert!(out[0].contains("-clear"));

    // Raw
    let out = dispatcher.handle_line(&format!("group {} description -raw", hid)).await;
    assert_eq!(out[0], "```\nHello\n```");

    // Clear
    let out = dispatcher.handle_line(&format!("group {} description -clear", hid)).await;
    assert!(out[0].contains("Group description cleared."));
    assert!(only_group(&store, &dispatcher).await.description.is_none());

    // Owner sees the hint
    let out = dispatcher.handle_line(&format!("group {} description", hid)).await;
    assert!(out[0].contains("To set one, type `pk;group"), "{:?}", out);

    // Stranger sees the plain notice and cannot edit
    register(&mut dispatcher, &store, "Others").await;
    let out = dispatcher.handle_line(&format!("group {} description", hid)).await;
    assert_eq!(out, vec!["This group does not have a description set.".to_string()]);
    let out = dispatcher.handle_line(&format!("group {} rename Mine", hid)).await;
    assert!(out[0].contains("your own system"), "{:?}", out);
    let out = dispatcher.handle_line(&format!("group {} description Hello", hid)).await;
    assert!(out[0].contains("your own system"), "{:?}", out);
    let stored = GroupRepository::find_by_hid(store.as_ref(), &hid).await.unwrap().unwrap();
    assert!(stored.description.is_none());
    assert_eq!(stored.name, "Alts");

    // Card shows both human ids
    let out = dispatcher.handle_line(&format!("group {}", hid)).await;
    assert!(out[0].starts_with("== Alts (Stars) =="), "{:?}", out);
    assert!(out[0].contains(&format!("System ID: {} | Group ID: {}", owner_hid, hid)));
}

#[tokio::test]
async fn test_clear_keyword_and_text_starting_with_clear() {
    let (store, mut dispatcher) = setup();
    register(&mut dispatcher, &store, "Stars").await;
    dispatcher.handle_line("group new Alters").await;
    let hid = only_group(&store, &dispatcher).await.hid.to_string();

    dispatcher
        .handle_line(&format!("group {} description clear skies", hid))
        .await;
    assert_eq!(
        only_group(&store, &dispatcher).await.description.as_deref(),
        Some("clear skies")
    );

    dispatcher
        .handle_line(&format!("group {} description clear", hid))
        .await;
    assert!(only_group(&store, &dispatcher).await.description.is_none());
}

#[tokio::test]
async fn test_errors_are_rendered() {
    let (store, mut dispatcher) = setup();

    let out = dispatcher.handle_line("group new Alters").await;
    assert!(out[0].contains("You do not have a system registered."), "{:?}", out);
    assert!(out[0].contains("pk;system new"));

    let out = dispatcher.handle_line(&format!("system new {}", "s".repeat(101))).await;
    assert!(out[0].contains("System name too long (101/100 characters)."), "{:?}", out);
    assert!(dispatcher.acting_system().is_none());

    register(&mut dispatcher, &store, "Stars").await;
    let out = dispatcher.handle_line("group new").await;
    assert!(out[0].contains("You must pass a group name."));

    let long = "x".repeat(101);
    let out = dispatcher.handle_line(&format!("group new {}", long)).await;
    assert!(out[0].contains("(101/100 characters)"), "{:?}", out);
    assert_eq!(store.group_count(), 0);

    let out = dispatcher.handle_line("group zzzzz").await;
    assert!(out[0].contains("Group not found: zzzzz"));

    let out = dispatcher.handle_line("group add Alters").await;
    assert!(out[0].contains("Group not found: add"), "{:?}", out);
    assert_eq!(store.group_count(), 0);
}

#[tokio::test]
async fn test_listing_paginates_and_keeps_creation_order() {
    let (store, mut dispatcher) = setup();
    let owner_hid = register(&mut dispatcher, &store, "Stars").await;

    let out = dispatcher.handle_line("group list").await;
    assert!(out[0].contains("pk;group new <name>"));

    for i in 0..30 {
        dispatcher.handle_line(&format!("group new Group {}", i)).await;
    }

    let out = dispatcher.handle_line("group list").await;
    assert_eq!(out.len(), 2);
    assert!(out[0].starts_with(&format!("# [1/2] Groups of Stars (`{}`)", owner_hid)));
    assert!(out.iter().all(|page| page.ends_with("-- 30 total")));

    let id = dispatcher.acting_system().unwrap();
    let listed = store.query_groups_in_system(id).await.unwrap();
    let first_page_hids: Vec<String> = listed[..25].iter().map(|g| g.hid.to_string()).collect();
    for hid in &first_page_hids {
        assert!(out[0].contains(hid.as_str()));
    }

    // Someone else looking at an empty system gets the plain notice
    let other_hid = register(&mut dispatcher, &store, "Empty").await;
    dispatcher.handle_line(&format!("as {}", owner_hid)).await;
    let out = dispatcher.handle_line(&format!("group list {}", other_hid)).await;
    assert_eq!(out, vec!["This system has no groups.".to_string()]);
}
