pub mod error;
pub mod one_hot;

pub use error::EncodeError;
pub use one_hot::{decode_one_hot, encode_one_hot};
