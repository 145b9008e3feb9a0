pub mod finder;
pub mod partition;

pub use finder::{find_coplanar_region, CoplanarParams};
pub use partition::{FacePartition, FaceRange};
