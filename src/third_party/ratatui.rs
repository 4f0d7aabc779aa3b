use std::fmt::Display;

use ratatui::text::{Line, Text};

use crate::{NodeRef, PrintConfig, Tree};

/// Rendered lines as owned [`Text`], for example to show them in a `Paragraph`.
#[must_use]
pub fn text<V, M>(node: NodeRef<'_, V, M>, config: &PrintConfig<'_, V, M>) -> Text<'static>
where
    V: Display,
    M: Display,
{
    node.render(config)
        .lines()
        .map(|line| Line::raw(line.to_owned()))
        .collect::<Vec<_>>()
        .into()
}

impl<V: Display, M: Display> From<NodeRef<'_, V, M>> for Text<'static> {
    fn from(node: NodeRef<'_, V, M>) -> Self {
        text(node, &PrintConfig::new())
    }
}

impl<V: Display, M: Display> From<&Tree<V, M>> for Text<'static> {
    fn from(tree: &Tree<V, M>) -> Self {
        tree.root().into()
    }
}

#[test]
fn text_has_one_line_per_rendered_line() {
    let tree = Tree::example();
    let config = PrintConfig::new().style(crate::Style::new());
    let text = text(tree.root(), &config);
    assert_eq!(text.height(), tree.len());
    assert_eq!(text.lines[2], Line::raw("├── b"));
}

#[test]
fn multiline_values_are_split() {
    let mut tree = Tree::<&str>::new();
    tree.root_mut().append_leaf("one\ntwo");
    let config = PrintConfig::new().style(crate::Style::new());
    let text = text(tree.root(), &config);
    assert_eq!(text.height(), 3);
    assert_eq!(text.lines[2], Line::raw("    two"));
}
