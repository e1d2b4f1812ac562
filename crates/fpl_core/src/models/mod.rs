pub mod category;
pub mod formation;
pub mod player;

pub use category::PositionCategory;
pub use formation::{Formation, FormationCatalog, RequiredActiveCounts};
pub use player::{Player, PlayerId};
