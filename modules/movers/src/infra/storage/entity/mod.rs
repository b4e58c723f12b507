//! SeaORM entities of the marketplace schema.

pub mod estimate_offer;
pub mod estimate_request;
pub mod like;
pub mod mover;
pub mod review;
