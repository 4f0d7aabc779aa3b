/*! Rendering of a (sub)tree into its text diagram.
 *
 * Every node takes one line: padding for each ancestor level, the connector and then the optional meta and the value.
 * Continuation lines of multi-line values get a padding reconstructed by walking up from the node to its root.
 */

use std::fmt::{self, Display};

use tracing::instrument;

use crate::node::NodeRef;
use crate::print_config::PrintConfig;
use crate::style::Style;
use crate::tree::{NodeId, Tree};

struct Printer<'t, 'c, 'f, V, M> {
    tree: &'t Tree<V, M>,
    config: &'c PrintConfig<'f, V, M>,
    style: Style,
    blank: String,
    link: String,
    out: String,
}

impl<'t, 'c, 'f, V, M> Printer<'t, 'c, 'f, V, M>
where
    V: Display,
    M: Display,
{
    fn new(tree: &'t Tree<V, M>, config: &'c PrintConfig<'f, V, M>) -> Self {
        let style = config.resolve_style();
        Self {
            tree,
            config,
            style,
            blank: style.blank_segment(),
            link: style.link_segment(),
            out: String::new(),
        }
    }

    fn print(mut self, id: NodeId) -> String {
        let tree = self.tree;
        let node = tree.data(id);
        if node.parent.is_none() {
            if let Some(meta) = &node.meta {
                self.config.write_meta(meta, &mut self.out);
            }
            self.config.write_value(&node.value, &mut self.out);
            self.out.push('\n');
        } else {
            // A subtree still attached to its parent is drawn with its own connector.
            // Its children continue on the same level.
            let edge = if node.children.is_empty() {
                self.style.edge_end
            } else {
                self.style.edge_mid
            };
            self.print_values(0, &[], edge, id);
        }
        self.print_nodes(&node.children);
        self.out
    }

    /// Depth-first over all descendants with an explicit stack of `(node, level, is_last)`.
    ///
    /// `levels_ended[level]` tells whether the ancestor on that level was the last of its siblings.
    fn print_nodes(&mut self, nodes: &[NodeId]) {
        let tree = self.tree;
        let mut levels_ended = Vec::new();
        let mut stack = Vec::new();
        push_children(&mut stack, nodes, 0);
        while let Some((id, level, is_last)) = stack.pop() {
            levels_ended.truncate(level);
            let edge = if is_last {
                self.style.edge_end
            } else {
                self.style.edge_mid
            };
            self.print_values(level, &levels_ended, edge, id);
            levels_ended.push(is_last);
            push_children(&mut stack, &tree.data(id).children, level + 1);
        }
    }

    fn print_values(&mut self, level: usize, levels_ended: &[bool], edge: &str, id: NodeId) {
        for &ended in &levels_ended[..level] {
            if ended {
                self.out.push_str(&self.blank);
            } else {
                self.out.push_str(&self.link);
            }
        }

        let value = self.render_value(level, id);
        self.out.push_str(edge);
        self.out.push(' ');
        if let Some(meta) = &self.tree.data(id).meta {
            self.config.write_meta(meta, &mut self.out);
        }
        self.out.push_str(&value);
        self.out.push('\n');
    }

    fn render_value(&self, level: usize, id: NodeId) -> String {
        let mut value = String::new();
        self.config.write_value(&self.tree.data(id).value, &mut value);
        if value.contains('\n') {
            let padding = self.padding(level, id);
            value.replace('\n', &format!("\n{padding}"))
        } else {
            value
        }
    }

    /// Padding in front of continuation lines of a multi-line value.
    ///
    /// Walks upwards from the node. On each level the segment stays blank when the node on that level is the last of its siblings
    /// as nothing below it needs to be linked. Otherwise the link continues to the next sibling.
    /// Levels above a rootless ancestor or above the rendered level stay empty.
    fn padding(&self, level: usize, id: NodeId) -> String {
        let mut segments = vec![""; level + 1];
        let mut slot = Some(level);
        let mut node = NodeRef::new(self.tree, id);
        while let (Some(parent), Some(index)) = (node.parent(), slot) {
            segments[index] = if node.is_last() {
                self.blank.as_str()
            } else {
                self.link.as_str()
            };
            slot = index.checked_sub(1);
            node = parent;
        }
        segments.concat()
    }
}

/// Push in reverse so the first child is popped first.
fn push_children(stack: &mut Vec<(NodeId, usize, bool)>, children: &[NodeId], level: usize) {
    let last = children.len().saturating_sub(1);
    stack.extend(
        children
            .iter()
            .enumerate()
            .rev()
            .map(|(index, &id)| (id, level, index == last)),
    );
}

impl<V, M> NodeRef<'_, V, M>
where
    V: Display,
    M: Display,
{
    /// Render this node and all of its descendants.
    ///
    /// A node without parent is drawn as root: its value without a connector and its children below.
    /// The output always ends with a line break.
    ///
    /// # Example
    ///
    /// ```
    /// # use treeprint::{PrintConfig, Tree};
    /// let mut tree = Tree::<&str>::new();
    /// tree.root_mut().append_leaf("a").append_leaf("b");
    ///
    /// let rendered = tree.root().render(&PrintConfig::new());
    /// assert_eq!(rendered, ".\n├── a\n└── b\n");
    /// ```
    #[must_use]
    #[instrument(level = "trace", skip_all, fields(node = %self.id, children = self.child_count()))]
    pub fn render(&self, config: &PrintConfig<'_, V, M>) -> String {
        Printer::new(self.tree, config).print(self.id)
    }

    /// Same as [`render`](Self::render) as raw UTF-8 bytes.
    #[must_use]
    pub fn to_bytes(&self, config: &PrintConfig<'_, V, M>) -> Vec<u8> {
        self.render(config).into_bytes()
    }

    /// Render into the given writer.
    ///
    /// # Errors
    ///
    /// Errors when the writer fails.
    pub fn write_to<W>(&self, mut writer: W, config: &PrintConfig<'_, V, M>) -> std::io::Result<()>
    where
        W: std::io::Write,
    {
        writer.write_all(self.render(config).as_bytes())?;
        writer.flush()
    }
}

impl<V: Display, M: Display> Display for NodeRef<'_, V, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&PrintConfig::new()))
    }
}

#[cfg(test)]
fn render(tree: &Tree<&'static str>) -> String {
    tree.render(&PrintConfig::new().style(Style::new()))
}

#[test]
fn empty_tree_is_one_line() {
    let tree = Tree::<&str>::new();
    assert_eq!(render(&tree), ".\n");
}

#[test]
fn leaves_get_connectors() {
    let mut tree = Tree::<&str>::new();
    tree.root_mut().append_leaf("a").append_leaf("b");
    assert_eq!(render(&tree), ".\n├── a\n└── b\n");
}

#[test]
fn nested_branch_links_to_next_sibling() {
    let mut tree = Tree::<&str>::new();
    let mut root = tree.root_mut();
    root.append_branch("x").append_leaf("y");
    root.append_leaf("z");
    assert_eq!(render(&tree), ".\n├── x\n│   └── y\n└── z\n");
}

#[test]
fn example_tree() {
    let expected = [
        ".",
        "├── a",
        "├── b",
        "│   ├── c",
        "│   ├── d",
        "│   │   ├── e",
        "│   │   └── f",
        "│   └── g",
        "└── h",
        "",
    ]
    .join("\n");
    assert_eq!(render(&Tree::example()), expected);
}

#[test]
fn line_count_equals_node_count() {
    let tree = Tree::example();
    assert_eq!(render(&tree).lines().count(), tree.len());
}

#[test]
fn n_leaves_are_n_lines_below_parent() {
    let mut tree = Tree::<&str>::with_root("root");
    let mut root = tree.root_mut();
    for value in ["1", "2", "3", "4", "5"] {
        root.append_leaf(value);
    }
    let rendered = render(&tree);
    let lines = rendered.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "root");
    assert!(lines[1..5].iter().all(|line| line.starts_with("├── ")));
    assert_eq!(lines[5], "└── 5");
}

#[test]
fn meta_is_written_before_value() {
    let mut tree = Tree::<&str>::new();
    tree.root_mut()
        .append_leaf_with_meta("dir", "src")
        .append_leaf("README.md");
    tree.root_mut().set_meta("root");
    assert_eq!(render(&tree), "[root]  .\n├── [dir]  src\n└── README.md\n");
}

#[test]
fn multiline_value_under_non_last_ancestors() {
    let mut tree = Tree::<&str>::new();
    let mut root = tree.root_mut();
    {
        let mut a = root.append_branch("a");
        a.append_branch("b").append_leaf("one\ntwo\nthree").append_leaf("c");
        a.append_leaf("d");
    }
    root.append_leaf("e");
    let expected = [
        ".",
        "├── a",
        "│   ├── b",
        "│   │   ├── one",
        "│   │   │   two",
        "│   │   │   three",
        "│   │   └── c",
        "│   └── d",
        "└── e",
        "",
    ]
    .join("\n");
    let rendered = render(&tree);
    assert_eq!(rendered, expected);
    assert_eq!(rendered.lines().count(), tree.len() + 2);
}

#[test]
fn multiline_value_below_last_ancestors() {
    let mut tree = Tree::<&str>::new();
    tree.root_mut()
        .append_branch("a")
        .append_leaf("b")
        .append_leaf("one\ntwo");
    let expected = [".", "└── a", "    ├── b", "    └── one", "        two", ""].join("\n");
    assert_eq!(render(&tree), expected);
}

#[test]
fn multiline_padding_is_exact() {
    let mut tree = Tree::<&str>::new();
    let id = {
        let mut root = tree.root_mut();
        let mut a = root.append_branch("a");
        let id = a.append_branch("first\nsecond").id();
        a.append_leaf("sibling");
        root.append_leaf("last");
        id
    };
    let style = Style::new();
    let printer_config = PrintConfig::new().style(style);
    let printer = Printer::new(&tree, &printer_config);
    assert_eq!(printer.padding(1, id), "│   │   ");
}

#[test]
fn custom_value_formatter_applies_to_every_node() {
    let mut tree = Tree::<&str>::new();
    tree.root_mut().append_branch("x").append_leaf("y");
    let config = PrintConfig::new()
        .style(Style::new())
        .value(|value: &&str, out: &mut String| out.push_str(&value.to_uppercase()));
    assert_eq!(tree.render(&config), ".\n└── X\n    └── Y\n");
}

#[test]
fn promoted_branch_renders_as_root() {
    let mut tree = Tree::<&str>::new();
    let id = {
        let mut root = tree.root_mut();
        let mut x = root.append_branch("x");
        x.append_leaf("y").append_leaf("z");
        x.promote_to_branch();
        x.id()
    };
    let config = PrintConfig::new().style(Style::new());
    assert_eq!(
        tree.node(id).unwrap().render(&config),
        "x\n├── y\n└── z\n"
    );
}

#[test]
fn attached_subtree_keeps_connector() {
    let tree = Tree::example();
    let config = PrintConfig::new().style(Style::new());
    let d = tree.root().find_by_value_deep("d").unwrap();
    assert_eq!(d.render(&config), "├── d\n├── e\n└── f\n");
    let f = tree.root().find_by_value_deep("f").unwrap();
    assert_eq!(f.render(&config), "└── f\n");
}

#[test]
fn attached_multiline_subtree_does_not_walk_past_its_level() {
    let mut tree = Tree::<&str>::new();
    let id = tree
        .root_mut()
        .append_branch("a")
        .append_branch("b")
        .append_branch("one\ntwo")
        .id();
    let config = PrintConfig::new().style(Style::new());
    assert_eq!(
        tree.node(id).unwrap().render(&config),
        "└── one\n    two\n"
    );
}

#[test]
fn padding_stops_at_promoted_ancestor() {
    let mut tree = Tree::<&str>::new();
    {
        let mut root = tree.root_mut();
        let mut a = root.append_branch("a");
        a.append_leaf("one\ntwo").append_leaf("b");
        a.promote_to_branch();
        root.append_leaf("c");
    }
    let expected = [
        ".",
        "├── a",
        "│   ├── one",
        "│   two",
        "│   └── b",
        "└── c",
        "",
    ]
    .join("\n");
    assert_eq!(render(&tree), expected);
}

#[test]
fn custom_style_changes_indentation() {
    let mut tree = Tree::<&str>::new();
    let mut root = tree.root_mut();
    root.append_branch("x").append_leaf("y");
    root.append_leaf("z");
    let style = Style::new().indent_size(1);
    let rendered = tree.render(&PrintConfig::new().style(style));
    assert_eq!(rendered, ".\n├── x\n│ └── y\n└── z\n");
}

#[test]
fn bytes_and_writer_match_string() {
    let tree = Tree::example();
    let config = PrintConfig::new().style(Style::new());
    let rendered = tree.render(&config);
    assert_eq!(tree.to_bytes(&config), rendered.as_bytes());

    let mut written = Vec::new();
    tree.root().write_to(&mut written, &config).unwrap();
    assert_eq!(written, rendered.as_bytes());
}

#[cfg(test)]
fn chain(depth: usize) -> (Tree<&'static str>, NodeId) {
    let mut tree = Tree::new();
    let mut id = NodeId::ROOT;
    for _ in 0..depth {
        id = tree.node_mut(id).unwrap().append_branch("link").id();
    }
    tree.node_mut(id).unwrap().set_meta("bottom");
    (tree, id)
}

#[test]
fn deep_chain_renders_without_exhausting_the_stack() {
    let depth = 10_000;
    let (tree, bottom) = chain(depth);
    let config = PrintConfig::new().style(Style::new().indent_size(0));
    let rendered = tree.render(&config);
    assert_eq!(rendered.lines().count(), depth + 1);
    let last_line = rendered.lines().last().unwrap();
    assert_eq!(last_line, format!("{}└── [bottom]  link", " ".repeat(depth - 1)));
    assert_eq!(tree.root().find_by_meta("bottom").unwrap().id(), bottom);
}
