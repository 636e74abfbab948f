//! Fixed layout hints passed to the SDK when creating publishers and
//! subscribers.

/// How a media element is inserted into its target region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertMode {
    /// Replace the region's contents.
    Replace,
    /// Append alongside existing tiles.
    Append,
}

/// Fixed pixel dimensions plus insert mode for one media element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileLayout {
    /// Insert mode for the target region.
    pub insert_mode: InsertMode,
    /// Width in pixels.
    pub width: u16,
    /// Height in pixels.
    pub height: u16,
}

impl TileLayout {
    /// Layout for the local publisher tile.
    pub const PUBLISHER: Self =
        Self { insert_mode: InsertMode::Replace, width: 153, height: 94 };

    /// Layout for the screen-share publisher (appended, publisher-sized).
    pub const SCREEN_PUBLISHER: Self =
        Self { insert_mode: InsertMode::Append, width: 153, height: 94 };

    /// Layout for remote subscribers.
    pub const SUBSCRIBER: Self =
        Self { insert_mode: InsertMode::Append, width: 640, height: 390 };
}
