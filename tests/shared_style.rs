//! The shared style is process-wide, so everything touching it lives in this single test.

use treeprint::{PrintConfig, Style, Tree};

fn two_trees() -> (Tree<&'static str>, Tree<&'static str>) {
    let mut first = Tree::new();
    {
        let mut root = first.root_mut();
        root.append_branch("x").append_leaf("y");
        root.append_leaf("z");
    }
    let mut second = Tree::with_root("second");
    second
        .root_mut()
        .append_branch("a")
        .append_leaf("b")
        .append_leaf("multi\nline");
    (first, second)
}

#[test]
fn shared_style_affects_all_following_renders() {
    let (first, second) = two_trees();
    assert_eq!(treeprint::shared_style(), Style::new());
    assert_eq!(first.to_string(), ".\n├── x\n│   └── y\n└── z\n");

    treeprint::set_indent_size(1);
    assert_eq!(first.to_string(), ".\n├── x\n│ └── y\n└── z\n");
    assert_eq!(
        second.to_string(),
        "second\n└── a\n  ├── b\n  └── multi\n    line\n"
    );

    // An explicit style is independent of the shared one
    let explicit = PrintConfig::new().style(Style::new());
    assert_eq!(first.render(&explicit), ".\n├── x\n│   └── y\n└── z\n");

    treeprint::set_edge_link("|");
    treeprint::set_edge_mid("|--");
    treeprint::set_edge_end("`--");
    assert_eq!(first.to_string(), ".\n|-- x\n| `-- y\n`-- z\n");
    assert_eq!(
        String::from_utf8(first.to_bytes(&PrintConfig::new())).unwrap(),
        ".\n|-- x\n| `-- y\n`-- z\n"
    );

    treeprint::reset_shared_style();
    assert_eq!(treeprint::shared_style().get_indent_size(), 3);
    assert_eq!(first.to_string(), ".\n├── x\n│   └── y\n└── z\n");
}
