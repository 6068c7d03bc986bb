use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PileError {
    #[error("adapter is empty: item count is 0")]
    EmptyAdapter,

    #[error("width {width}px leaves no room for a slot (slot width {slot_width}px)")]
    InvalidGeometry { width: i32, slot_width: i32 },
}

pub type Result<T> = std::result::Result<T, PileError>;
