mod assign_material;
mod hover_highlight;
mod select_region;

pub use assign_material::{AssignMaterial, MaterialAssignment};
pub use hover_highlight::HoverHighlight;
pub use select_region::SelectRegion;
