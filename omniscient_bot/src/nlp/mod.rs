//! The caption cleanup pipeline. Auto-generated captions arrive as a
//! lowercase, unpunctuated, typo-ridden wall of text; these stages
//! turn that into something a person would actually want to read.
//!
//! Stage order matters: spelling first (it works on raw tokens),
//! then punctuation, then summarization over proper sentences.

mod spelling;
pub use spelling::SpellingModel;

mod punctuation;
pub use punctuation::restore_punctuation;

mod summarize;
pub use summarize::summarize;
