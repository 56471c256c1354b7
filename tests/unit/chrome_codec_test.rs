//! Unit tests for the Chrome bookmark interchange codec.

use treemark::managers::tree_manager::{BookmarkTree, TreeManagerTrait};
use treemark::services::chrome_codec::{
    export_json, export_to_chrome, import_from_chrome, import_into, import_json, parse_records,
};
use treemark::types::chrome::ChromeBookmark;
use treemark::types::errors::{ChromeCodecError, TreeError};
use treemark::types::node::{BookmarkNode, FolderNode, TreeNode};

fn record(id: &str, title: &str, index: Option<usize>) -> ChromeBookmark {
    ChromeBookmark {
        id: id.to_string(),
        parent_id: None,
        index,
        title: title.to_string(),
        date_added: None,
        url: None,
        icon: None,
        description: None,
        tags: None,
        children: None,
    }
}

fn sample_tree() -> Vec<TreeNode> {
    vec![TreeNode::Folder(FolderNode {
        id: "1".to_string(),
        name: "Bar".to_string(),
        position: 0,
        parent_id: None,
        is_expanded: false,
        children: vec![
            TreeNode::Bookmark(BookmarkNode {
                id: "2".to_string(),
                name: "Example".to_string(),
                position: 0,
                parent_id: Some("1".to_string()),
                url: "https://example.com".to_string(),
                icon: Some("https://example.com/favicon.ico".to_string()),
                description: Some("Example domain".to_string()),
                tags: Some(vec!["demo".to_string()]),
            }),
            TreeNode::Folder(FolderNode {
                id: "3".to_string(),
                name: "Empty".to_string(),
                position: 1,
                parent_id: Some("1".to_string()),
                is_expanded: true,
                children: vec![],
            }),
        ],
    })]
}

#[test]
fn test_export_marks_folders_with_children_arrays() {
    let records = export_to_chrome(&sample_tree());

    assert_eq!(records.len(), 1);
    let bar = &records[0];
    assert_eq!(bar.title, "Bar");
    assert_eq!(bar.index, Some(0));
    assert!(bar.url.is_none());

    let children = bar.children.as_ref().unwrap();
    assert_eq!(children[0].url.as_deref(), Some("https://example.com"));
    assert_eq!(children[0].parent_id.as_deref(), Some("1"));
    assert!(children[0].children.is_none());
    assert_eq!(children[1].children.as_deref(), Some(&[][..]));
}

#[test]
fn test_export_json_uses_chrome_key_names() {
    let json = export_json(&sample_tree(), false).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let child = &value[0]["children"][0];
    assert_eq!(child["parentId"], "1");
    assert_eq!(child["index"], 0);
    assert_eq!(child["title"], "Example");
    assert!(child.get("children").is_none());
    assert_eq!(value[0]["children"][1]["children"], serde_json::json!([]));
    assert!(value[0].get("dateAdded").is_none());
}

#[test]
fn test_pretty_export_is_multiline() {
    let pretty = export_json(&sample_tree(), true).unwrap();
    let compact = export_json(&sample_tree(), false).unwrap();
    assert!(pretty.contains('\n'));
    assert!(!compact.contains('\n'));
}

#[test]
fn test_import_orders_by_index_and_derives_parents() {
    let mut folder = record("1", "Bar", Some(0));
    let mut second = record("2", "Second", Some(1));
    second.url = Some("https://b.example".to_string());
    second.parent_id = Some("something-else".to_string());
    let mut first = record("3", "First", Some(0));
    first.url = Some("https://a.example".to_string());
    folder.children = Some(vec![second, first]);

    let nodes = import_from_chrome(&[folder]);
    let children = nodes[0].children().unwrap();

    assert_eq!(children[0].name(), "First");
    assert_eq!(children[1].name(), "Second");
    assert_eq!(children[0].position(), 0);
    assert_eq!(children[1].position(), 1);
    assert!(children.iter().all(|c| c.parent_id() == Some("1")));
}

#[test]
fn test_import_without_index_keeps_file_order() {
    let mut a = record("a", "A", None);
    a.url = Some("https://a.example".to_string());
    let mut b = record("b", "B", None);
    b.url = Some("https://b.example".to_string());

    let nodes = import_from_chrome(&[a, b]);
    assert_eq!(nodes[0].id(), "a");
    assert_eq!(nodes[1].id(), "b");
}

#[test]
fn test_import_folder_flags_and_missing_url() {
    let mut folder = record("f", "Folder", Some(0));
    folder.children = Some(vec![]);
    let leaf = record("x", "No url", Some(1));

    let nodes = import_from_chrome(&[folder, leaf]);
    match &nodes[0] {
        TreeNode::Folder(f) => {
            assert!(f.is_expanded);
            assert!(f.children.is_empty());
        }
        other => panic!("expected folder, got {:?}", other),
    }
    match &nodes[1] {
        TreeNode::Bookmark(b) => assert_eq!(b.url, ""),
        other => panic!("expected bookmark, got {:?}", other),
    }
}

#[test]
fn test_round_trip_preserves_shape_and_extensions() {
    let original = sample_tree();
    let json = export_json(&original, true).unwrap();
    let imported = import_json(&json).unwrap();

    // Folders come back expanded; everything else is identical.
    let mut expected = original;
    if let TreeNode::Folder(f) = &mut expected[0] {
        f.is_expanded = true;
    }
    assert_eq!(imported, expected);
}

#[test]
fn test_parse_rejects_malformed_json() {
    let err = parse_records("[{\"id\": \"1\",").unwrap_err();
    match err {
        ChromeCodecError::ParseError(msg) => {
            assert!(msg.starts_with("Invalid bookmark file format"))
        }
        other => panic!("expected ParseError, got {:?}", other),
    }
}

#[test]
fn test_parse_rejects_object_root() {
    let err = parse_records("{\"roots\": {}}").unwrap_err();
    assert!(matches!(err, ChromeCodecError::ParseError(_)));
}

#[test]
fn test_parse_accepts_empty_array() {
    assert!(import_json("[]").unwrap().is_empty());
}

#[test]
fn test_import_into_replaces_tree() {
    let mut tree = BookmarkTree::new();
    tree.create_folder("Old", None).unwrap();

    let json = export_json(&sample_tree(), false).unwrap();
    let count = import_into(&mut tree, &json).unwrap();

    assert_eq!(count, 3);
    assert!(tree.find("2").is_some());
    assert_eq!(tree.items()[0].name(), "Bar");
}

#[test]
fn test_import_into_is_all_or_nothing() {
    let mut tree = BookmarkTree::new();
    tree.create_folder("Keep", None).unwrap();
    let before = tree.clone();

    assert!(import_into(&mut tree, "not json").is_err());
    assert_eq!(tree, before);

    let duplicated = r#"[
        {"id": "1", "title": "A", "url": "https://a.example"},
        {"id": "1", "title": "B", "url": "https://b.example"}
    ]"#;
    let err = import_into(&mut tree, duplicated).unwrap_err();
    assert!(matches!(
        err,
        ChromeCodecError::Tree(TreeError::DuplicateId(ref id)) if id == "1"
    ));
    assert_eq!(tree, before);
}

#[test]
fn test_import_into_rejects_too_deep_documents() {
    let mut innermost = record("leaf", "Leaf", Some(0));
    innermost.url = Some("https://deep.example".to_string());
    let mut current = innermost;
    for level in (0..5).rev() {
        let mut folder = record(&format!("f{}", level), "Level", Some(0));
        folder.children = Some(vec![current]);
        current = folder;
    }
    let json = serde_json::to_string(&vec![current]).unwrap();

    let mut tree = BookmarkTree::new();
    let err = import_into(&mut tree, &json).unwrap_err();
    assert!(matches!(
        err,
        ChromeCodecError::Tree(TreeError::MaxDepthExceeded { .. })
    ));
    assert!(tree.is_empty());
}
