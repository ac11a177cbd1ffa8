//! Shared UI primitive library for the restaurant site's interactive blocks.
//!
//! The crate owns reusable Leptos primitives, a centralized icon API, and the
//! stable `data-ui-*` DOM contract consumed by the site CSS layers.
//! Blocks should compose these primitives instead of emitting ad hoc control
//! markup.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod icon;
mod primitives;

pub use icon::{Icon, IconName, IconSize};
pub use primitives::{
    bool_token, ButtonSize, ButtonVariant, Cluster, IconButton, IndicatorDot, LayoutAlign,
    LayoutGap, LayoutJustify,
};

/// Convenience imports for block crates consuming the shared primitive set.
pub mod prelude {
    pub use crate::{
        bool_token, ButtonSize, ButtonVariant, Cluster, Icon, IconButton, IconName, IconSize,
        IndicatorDot, LayoutAlign, LayoutGap, LayoutJustify,
    };
}
