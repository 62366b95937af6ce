use sculptor_physics::PhysicsError;
use sculptor_rules::RuleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("could not create body {index}")]
    AdapterInit {
        index: usize,
        #[source]
        source: PhysicsError,
    },
    #[error("simulator not initialized; call initialize() first")]
    NotInitialized,
    #[error("shape generation failed")]
    Generation(#[from] RuleError),
}
