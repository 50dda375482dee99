pub mod area_search;
pub mod chunk;
pub mod color_space;
pub mod grid_sampler;
pub mod pixel;
pub mod reference_pattern;
pub mod similarity;
pub mod utils;
