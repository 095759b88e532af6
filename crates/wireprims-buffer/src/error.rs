/// Errors that can occur in buffer operations.
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    /// The allocator could not provide the requested region.
    #[error("failed to allocate {requested} bytes for the buffer")]
    AllocationFailed { requested: usize },
}

pub type Result<T> = std::result::Result<T, BufferError>;
