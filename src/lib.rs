#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]

/*!
Render trees of labeled nodes as text diagrams like directory listing tools do.

A [`Tree`] is built by appending leaves and branches via [`NodeMut`] and rendered via [`NodeRef::render`] or its [`Display`](std::fmt::Display) implementation.
Each node has a value and an optional meta annotation which is shown in front of the value.
Values spanning multiple lines stay aligned with the vertical connectors.

# Example

```
# use treeprint::Tree;
let mut tree = Tree::<&str>::new();
let mut root = tree.root_mut();
root.append_leaf_with_meta("dir", "demos");
{
    let mut src = root.append_branch("src");
    src.append_leaf("lib.rs")
        .append_leaf("render.rs\n(multi-line)");
}
root.append_leaf("Cargo.toml");

let expected = "\
.
├── [dir]  demos
├── src
│   ├── lib.rs
│   └── render.rs
│       (multi-line)
└── Cargo.toml
";
assert_eq!(tree.to_string(), expected);
```

# Shared style

Indentation and connector glyphs are read from a process-wide [`Style`] whenever a render starts.
Changing it via [`set_indent_size`] or the `set_edge_*` functions changes every following render in the process, no matter which tree.
Pass a [`Style`] via [`PrintConfig::style`] to render with a different style without touching the shared one.
*/

mod node;
mod print_config;
mod render;
mod style;
pub mod third_party;
mod tree;

pub use crate::node::{Descendants, NodeMut, NodeRef};
pub use crate::print_config::{default_meta, default_value, Formatter, PrintConfig};
pub use crate::style::{
    reset_shared_style, set_edge_end, set_edge_link, set_edge_mid, set_indent_size,
    set_shared_style, shared_style, Style, DEFAULT_EDGE_END, DEFAULT_EDGE_LINK, DEFAULT_EDGE_MID,
    DEFAULT_INDENT_SIZE,
};
pub use crate::tree::{NodeId, Tree};
