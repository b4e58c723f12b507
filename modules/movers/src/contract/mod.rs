pub mod model;

pub use model::{MoverListQuery, MoverSummary, OpenRequest};
