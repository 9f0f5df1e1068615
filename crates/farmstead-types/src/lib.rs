//! Shared type definitions for the Farmstead farming client.
//!
//! This crate is the single source of truth for the data that flows between
//! the computation core and the browser client. Types defined here are
//! exported to `TypeScript` via `ts-rs` so the UI consumes the exact shapes
//! the core produces.
//!
//! # Modules
//!
//! - [`enums`] -- Crop kinds, seasons, pattern kinds, harvest status
//! - [`structs`] -- Tiles, derived tile state, grid coordinates, pattern results

pub mod enums;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{CropType, HarvestStatus, PatternKind, Season};
pub use structs::{Coords, PatternInfo, Tile, TileState};

#[cfg(test)]
mod tests {
    //! Integration tests for type exports and `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // ts-rs writes the bindings relative to the crate root when
        // `export_all` runs for types marked with #[ts(export)].
        use ts_rs::TS;

        let _ = crate::enums::CropType::export_all();
        let _ = crate::enums::Season::export_all();
        let _ = crate::enums::PatternKind::export_all();
        let _ = crate::enums::HarvestStatus::export_all();

        let _ = crate::structs::Tile::export_all();
        let _ = crate::structs::TileState::export_all();
        let _ = crate::structs::Coords::export_all();
        let _ = crate::structs::PatternInfo::export_all();
    }
}
