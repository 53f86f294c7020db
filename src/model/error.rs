use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid dimension size 0 for axis {axis}")]
    ZeroSizedDimension { axis: &'static str },

    #[error(
        "channel count mismatch: image declares {size_c} channels but carries {channels} descriptors"
    )]
    ChannelCountMismatch { size_c: usize, channels: usize },
}
