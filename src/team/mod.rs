pub mod composition;
pub mod lookup;
pub mod roster;

pub use composition::{Side, TeamComposition};
