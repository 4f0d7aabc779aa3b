/*! Conversions of renderings into types of other crates.
 *
 * See the Cargo.toml for available features.
 */

#[cfg(feature = "ratatui")]
pub mod ratatui;
