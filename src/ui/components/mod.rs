pub mod item_display;
pub mod level_picker;
pub mod proficiency_grid;
