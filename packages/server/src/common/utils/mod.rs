pub mod model_text;

pub use model_text::*;
