pub mod analysis;
pub mod facility;

pub use analysis::*;
pub use facility::*;
