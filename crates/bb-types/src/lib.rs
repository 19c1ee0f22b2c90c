//! Core types and traits for the blackboard working memory.
//!
//! Items are addressed by `ref` inside a namespace; request/response DTOs describe the RPC surface.

mod dto;
mod item;
mod traits;

pub use dto::*;
pub use item::*;
pub use traits::*;
