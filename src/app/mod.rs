pub mod pipelines;

pub use pipelines::activity_pipeline::ActivityPipeline;
pub use pipelines::translation_pipeline::TranslationPipeline;
pub use pipelines::OutputOptions;
