pub mod comparison;
pub mod filter_bar;
pub mod header;
pub mod tasting_panel;
pub mod wine_grid;
