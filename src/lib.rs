pub mod config;
pub mod document;
pub mod extract;
pub mod normalize;
pub mod pipeline;
pub mod range;
pub mod series;
pub mod tariff;
