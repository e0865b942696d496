mod standard;

pub use standard::Standard;
