use crate::loading::error::LoadError;
use crate::render::error::RenderError;
use crate::report::error::ReportError;
use crate::transform::error::TransformError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
