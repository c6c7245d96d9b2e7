/// Convenience result type used across quotecard.
pub type CardResult<T> = Result<T, CardError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum CardError {
    /// Invalid caller-provided data (colors, formats, content limits).
    #[error("validation error: {0}")]
    Validation(String),

    /// Template lookup outside of a category's variant list.
    #[error("template index {index} out of range for category '{category}' ({len} variants)")]
    OutOfRange {
        /// Category name.
        category: String,
        /// Requested variant index.
        index: usize,
        /// Number of variants in the category.
        len: usize,
    },

    /// A background or logo reference could not be read or decoded.
    #[error("asset load error for '{reference}': {reason}")]
    AssetLoad {
        /// Image reference as given by the caller.
        reference: String,
        /// Human readable cause.
        reason: String,
    },

    /// Unexpected failure while building or rasterizing draw operations.
    #[error("draw error: {0}")]
    Draw(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CardError {
    /// Build a [`CardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CardError::AssetLoad`] value.
    pub fn asset_load(reference: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::AssetLoad {
            reference: reference.into(),
            reason: reason.to_string(),
        }
    }

    /// Build a [`CardError::Draw`] value.
    pub fn draw(msg: impl Into<String>) -> Self {
        Self::Draw(msg.into())
    }

    /// Build a [`CardError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// True for failures that the renderer recovers from with a visual fallback.
    pub fn is_asset_load(&self) -> bool {
        matches!(self, Self::AssetLoad { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
