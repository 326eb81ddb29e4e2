/// Errors raised by the registry framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("No free id after {attempts} attempts")]
    IdSpaceExhausted { attempts: usize },
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers an entity's own error type from [`EntityError`](Self::EntityError).
    ///
    /// Anything else, including an entity error of a different type, comes
    /// back unchanged in `Err` so the caller can map it.
    pub fn downcast_entity<E>(self) -> Result<E, FrameworkError>
    where
        E: std::error::Error + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => inner
                .downcast::<E>()
                .map(|e| *e)
                .map_err(FrameworkError::EntityError),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, thiserror::Error)]
    #[error("out of stock")]
    struct OutOfStock;

    #[test]
    fn downcast_recovers_the_entity_error() {
        let err = FrameworkError::EntityError(Box::new(OutOfStock));
        assert_eq!(err.downcast_entity::<OutOfStock>().unwrap(), OutOfStock);
    }

    #[test]
    fn downcast_passes_other_errors_through() {
        let err = FrameworkError::EntityError(Box::new(std::io::Error::other("disk")));
        let back = err.downcast_entity::<OutOfStock>().unwrap_err();
        assert!(back.to_string().contains("disk"));

        let closed = FrameworkError::ActorClosed.downcast_entity::<OutOfStock>();
        assert!(matches!(closed, Err(FrameworkError::ActorClosed)));
    }
}
