// Public library interface for category-treemap
// The CLI and the debug-layout tool both drive the engine through these modules

pub mod config;
pub mod data;
pub mod layout;
pub mod render;
pub mod ui;

pub use config::TreemapConfig;
pub use data::CategoryNode;
pub use layout::TileRect;
pub use render::LabelEngine;
