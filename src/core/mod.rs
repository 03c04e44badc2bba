pub mod breaker;
pub mod composer;
pub mod context;
pub mod pipeline;
pub mod rng;
pub mod sampler;
pub mod sanitize;
pub mod variety;
