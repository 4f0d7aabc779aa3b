use std::fmt::{self, Display, Write as _};

use crate::style::Style;

/// Writes the display form of a meta or value into the rendering.
pub type Formatter<'a, T> = Box<dyn Fn(&T, &mut String) + 'a>;

/// Optional customization of a single render call.
///
/// Without any formatter meta values are written as `[meta]` and values via their [`Display`] implementation.
/// Without a [`Style`] the [shared style](crate::shared_style) is used.
///
/// # Example
///
/// ```
/// # use treeprint::{PrintConfig, Tree};
/// let mut tree = Tree::<&str>::new();
/// tree.root_mut().append_leaf_with_meta("dir", "src");
///
/// let config = PrintConfig::new()
///     .meta(|meta: &&str, out: &mut String| out.push_str(&meta.to_uppercase()))
///     .value(|value: &&str, out: &mut String| out.push_str(&format!("{value}/")));
/// assert_eq!(tree.render(&config), "./\n└── DIR  src/\n");
/// ```
pub struct PrintConfig<'a, V, M = V> {
    meta: Option<Formatter<'a, M>>,
    value: Option<Formatter<'a, V>>,
    style: Option<Style>,
}

impl<'a, V, M> PrintConfig<'a, V, M> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            meta: None,
            value: None,
            style: None,
        }
    }

    /// Replace the default `[meta]` formatting.
    #[must_use]
    pub fn meta<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&M, &mut String) + 'a,
    {
        self.meta = Some(Box::new(formatter));
        self
    }

    /// Replace the default [`Display`] formatting of values.
    #[must_use]
    pub fn value<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&V, &mut String) + 'a,
    {
        self.value = Some(Box::new(formatter));
        self
    }

    /// Use this style for this render only instead of the shared one.
    #[must_use]
    pub const fn style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub(crate) fn resolve_style(&self) -> Style {
        self.style.unwrap_or_else(crate::style::shared_style)
    }
}

impl<V: Display, M: Display> PrintConfig<'_, V, M> {
    /// Meta followed by the two space separator.
    pub(crate) fn write_meta(&self, meta: &M, out: &mut String) {
        match &self.meta {
            Some(formatter) => formatter(meta, out),
            None => default_meta(meta, out),
        }
        out.push_str("  ");
    }

    pub(crate) fn write_value(&self, value: &V, out: &mut String) {
        match &self.value {
            Some(formatter) => formatter(value, out),
            None => default_value(value, out),
        }
    }
}

impl<V, M> Default for PrintConfig<'_, V, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, M> fmt::Debug for PrintConfig<'_, V, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrintConfig")
            .field("meta", &self.meta.as_ref().map(|_| "custom"))
            .field("value", &self.value.as_ref().map(|_| "custom"))
            .field("style", &self.style)
            .finish()
    }
}

/// Writes `[meta]`.
pub fn default_meta<M: Display + ?Sized>(meta: &M, out: &mut String) {
    // Writing into a String does not fail
    let _ = write!(out, "[{meta}]");
}

pub fn default_value<V: Display + ?Sized>(value: &V, out: &mut String) {
    let _ = write!(out, "{value}");
}

#[test]
fn defaults_wrap_meta_in_brackets() {
    let config = PrintConfig::<&str>::new();
    let mut out = String::new();
    config.write_meta(&"meta", &mut out);
    config.write_value(&"value", &mut out);
    assert_eq!(out, "[meta]  value");
}

#[test]
fn custom_formatters_are_used() {
    let config = PrintConfig::<u32, char>::new()
        .meta(|meta: &char, out: &mut String| out.push(*meta))
        .value(|value: &u32, out: &mut String| {
            let _ = write!(out, "{value:#x}");
        });
    let mut out = String::new();
    config.write_meta(&'m', &mut out);
    config.write_value(&255, &mut out);
    assert_eq!(out, "m  0xff");
}

#[test]
fn explicit_style_wins_over_shared() {
    let style = Style::new().indent_size(7);
    let config = PrintConfig::<&str>::new().style(style);
    assert_eq!(config.resolve_style(), style);
}
