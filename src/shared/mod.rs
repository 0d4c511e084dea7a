pub mod money;
pub mod shutdown;
pub mod types;
pub mod utils;
pub mod validations;

pub use shutdown::*;
pub use types::*;
pub use utils::*;
pub use validations::*;
