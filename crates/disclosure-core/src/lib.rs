pub mod classifier;
pub mod clock;
pub mod error;
pub mod traits;
pub mod types;

pub use classifier::*;
pub use clock::*;
pub use error::*;
pub use traits::*;
pub use types::*;
