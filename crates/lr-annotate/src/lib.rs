pub mod assemble;
pub mod normalize;
pub mod numwords;
pub mod resolve;
pub mod result;
pub mod session;
pub mod spans;
pub mod tokenize;

pub use assemble::{AnnotateConfig, Annotator};
pub use resolve::AnnotatedPart;
pub use result::*;
pub use session::{RenderSession, SelectionController, SelectionState};
