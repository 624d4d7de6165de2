//! Terminal presentation of the event list.
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready projection of a view snapshot
//! - [`renderer`]: Text layout of that projection
//! - [`helpers`]: ANSI escapes and truncation

pub mod helpers;
pub mod renderer;
pub mod viewmodel;

pub use renderer::{render, RenderOptions};
pub use viewmodel::{DisplayItem, EmptyState, FooterInfo, HeaderInfo, ListViewModel, Row, ToastBanner};
