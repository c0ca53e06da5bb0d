pub mod facade;

pub use crate::domain::model::{EntityRef, Fields};
pub use crate::domain::ports::Repository;
pub use crate::utils::error::Result;
pub use facade::{HbnbFacade, Repositories};
