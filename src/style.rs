use std::sync::{PoisonError, RwLock};

/// Indentation and connector glyphs used to draw a tree.
///
/// Every render reads the process-wide shared style once when it starts (see [`shared_style`]).
/// Changing it affects all trees rendered afterwards, not only one.
/// To render with a different style without touching the shared one pass it via
/// [`PrintConfig::style`](crate::PrintConfig::style).
///
/// # Example
///
/// ```
/// # use treeprint::{PrintConfig, Style, Tree};
/// let mut tree = Tree::<&str>::new();
/// tree.root_mut().append_branch("x").append_leaf("y");
///
/// let ascii = Style::new()
///     .indent_size(2)
///     .edge_link("|")
///     .edge_mid("|--")
///     .edge_end("`--");
/// let rendered = tree.render(&PrintConfig::new().style(ascii));
/// assert_eq!(rendered, ".\n`-- x\n   `-- y\n");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    /// Number of spaces per level following the link glyph
    pub(crate) indent_size: usize,
    /// Vertical glyph continuing a level downwards
    pub(crate) edge_link: &'static str,
    /// Glyph in front of a node which has following siblings
    pub(crate) edge_mid: &'static str,
    /// Glyph in front of the last node of its siblings
    pub(crate) edge_end: &'static str,
}

pub const DEFAULT_INDENT_SIZE: usize = 3;
pub const DEFAULT_EDGE_LINK: &str = "│";
pub const DEFAULT_EDGE_MID: &str = "├──";
pub const DEFAULT_EDGE_END: &str = "└──";

static SHARED: RwLock<Style> = RwLock::new(Style::new());

impl Style {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            indent_size: DEFAULT_INDENT_SIZE,
            edge_link: DEFAULT_EDGE_LINK,
            edge_mid: DEFAULT_EDGE_MID,
            edge_end: DEFAULT_EDGE_END,
        }
    }

    /// Spaces per level after the link glyph. A level is `indent_size + 1` columns wide,
    /// so the padding of each rendered level has to fit into memory.
    #[must_use]
    pub const fn indent_size(mut self, indent_size: usize) -> Self {
        self.indent_size = indent_size;
        self
    }

    #[must_use]
    pub const fn edge_link(mut self, symbol: &'static str) -> Self {
        self.edge_link = symbol;
        self
    }

    #[must_use]
    pub const fn edge_mid(mut self, symbol: &'static str) -> Self {
        self.edge_mid = symbol;
        self
    }

    #[must_use]
    pub const fn edge_end(mut self, symbol: &'static str) -> Self {
        self.edge_end = symbol;
        self
    }

    #[must_use]
    pub const fn get_indent_size(&self) -> usize {
        self.indent_size
    }

    #[must_use]
    pub const fn get_edge_link(&self) -> &'static str {
        self.edge_link
    }

    #[must_use]
    pub const fn get_edge_mid(&self) -> &'static str {
        self.edge_mid
    }

    #[must_use]
    pub const fn get_edge_end(&self) -> &'static str {
        self.edge_end
    }

    /// Width of a level which has already ended.
    pub(crate) const fn blank_width(&self) -> usize {
        self.indent_size.saturating_add(1)
    }

    /// Padding of a level which has already ended (no link continues below it).
    pub(crate) fn blank_segment(&self) -> String {
        " ".repeat(self.blank_width())
    }

    /// Padding of a level which continues with a link below it.
    pub(crate) fn link_segment(&self) -> String {
        format!("{}{}", self.edge_link, " ".repeat(self.indent_size))
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::new()
    }
}

/// Style currently shared by all renders without an explicit style.
#[must_use]
pub fn shared_style() -> Style {
    *SHARED.read().unwrap_or_else(PoisonError::into_inner)
}

/// Replace the shared style. Last writer wins for every following render in the process.
pub fn set_shared_style(style: Style) {
    tracing::debug!(?style, "replace shared tree style");
    *SHARED.write().unwrap_or_else(PoisonError::into_inner) = style;
}

/// Restore the shared style to [`Style::new`].
pub fn reset_shared_style() {
    set_shared_style(Style::new());
}

fn update_shared(update: impl FnOnce(Style) -> Style) {
    let mut shared = SHARED.write().unwrap_or_else(PoisonError::into_inner);
    *shared = update(*shared);
    tracing::debug!(style = ?*shared, "update shared tree style");
}

/// Set the number of spaces per tree level of the shared style.
pub fn set_indent_size(indent_size: usize) {
    update_shared(|style| style.indent_size(indent_size));
}

pub fn set_edge_link(symbol: &'static str) {
    update_shared(|style| style.edge_link(symbol));
}

pub fn set_edge_mid(symbol: &'static str) {
    update_shared(|style| style.edge_mid(symbol));
}

pub fn set_edge_end(symbol: &'static str) {
    update_shared(|style| style.edge_end(symbol));
}

#[test]
fn segments_have_equal_width_with_default_glyphs() {
    let style = Style::new();
    assert_eq!(style.blank_segment(), "    ");
    assert_eq!(style.link_segment(), "│   ");
    assert_eq!(
        style.blank_segment().chars().count(),
        style.link_segment().chars().count()
    );
}

#[test]
fn indent_size_changes_segments() {
    let style = Style::new().indent_size(1).edge_link("|");
    assert_eq!(style.blank_segment(), "  ");
    assert_eq!(style.link_segment(), "| ");
}

#[test]
fn blank_width_saturates() {
    assert_eq!(Style::new().blank_width(), 4);
    assert_eq!(Style::new().indent_size(usize::MAX).blank_width(), usize::MAX);
}
