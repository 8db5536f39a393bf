// CV analysis core: keyword scoring, experience estimation, fit aggregation
// and the pipeline that sequences them. Summarization lives in `summarizer`.

pub mod experience;
pub mod fit;
pub mod handlers;
pub mod keywords;
pub mod pipeline;
pub mod scoring;

pub use scoring::ScoringConfig;
