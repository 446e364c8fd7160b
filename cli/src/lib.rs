pub mod session;
pub mod source;

pub use session::{parse_judgments, print_results, Session};
pub use source::{DirSource, DocKind};
