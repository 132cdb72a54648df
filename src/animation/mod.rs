pub mod travel;

pub use travel::{EasingType, TokenTravel, TravelEngine};
