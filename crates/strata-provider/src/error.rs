use strata_terrain::TerrainParamsError;

/// Failure of a single chunk request.
///
/// Cloneable so one failed computation can be handed to every waiter attached to it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("chunk request cancelled")]
    Cancelled,

    #[error("chunk executor is closed")]
    ExecutorClosed,

    #[error("chunk generation failed: {0}")]
    GenerationFailed(String),

    #[error("chunk task failed: {0}")]
    TaskFailed(String),
}

/// Errors building a provider pipeline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderConfigError {
    #[error("max_concurrency must be at least 1")]
    ZeroConcurrency,

    #[error("invalid terrain parameters: {0}")]
    Terrain(#[from] TerrainParamsError),
}
