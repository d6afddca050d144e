pub mod category;
pub mod rule;
pub mod scan;
pub mod annotate;
pub mod rewrite;
pub mod engine;

pub use category::*;
pub use rule::*;
pub use scan::*;
pub use annotate::*;
pub use rewrite::*;
pub use engine::*;
