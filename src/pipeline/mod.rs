//! Pipeline stages for PDF-to-quiz generation.
//!
//! Each submodule implements one transformation step and is tested on its
//! own. Only [`extract`] and [`generate`] touch the outside world.
//!
//! ## Data Flow
//!
//! ```text
//! extract ──▶ preprocess ──▶ generate ──▶ validate
//! (pdfium)    (noise, rank,   (model │      (shape checks)
//!              stopwords,      parse │
//!              truncate)       facts → fallback)
//! ```
//!
//! 1. [`extract`]:    page text via pdfium, inside `spawn_blocking`
//! 2. [`preprocess`]: [`noise`] filter, [`rank`] sentences, trim
//!    [`stopwords`], cap the length
//! 3. [`generate`]:   prompt the model and [`parse`] its output; on failure
//!    mine [`facts`] and [`fallback`] to synthesised questions
//! 4. [`validate`]:   drop structurally invalid candidates

pub mod extract;
pub mod facts;
pub mod fallback;
pub mod generate;
pub mod noise;
pub mod parse;
pub mod preprocess;
pub mod rank;
pub mod stopwords;
pub mod validate;
