#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Map-side state for the accident map: the in-memory feature store, the
//! pure style resolver, the two-field filter state, the view (center,
//! zoom, layer visibility), the popup controller, and the full-repaint
//! render pass that ties them together.
//!
//! Everything in this crate is synchronous and single-threaded; a render
//! pass is one full re-evaluation of the style resolver over the store,
//! triggered by whichever event handler mutated state.

pub mod filter;
pub mod popup;
pub mod render;
pub mod store;
pub mod style;
pub mod view;

pub use filter::{FilterState, Selection};
pub use popup::{PopupContent, PopupController};
pub use render::{RenderFrame, RenderedPoint};
pub use store::FeatureStore;
pub use style::{PointStyle, PolygonStyle};
pub use view::{LayerId, MapView};
