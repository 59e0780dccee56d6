//! Image preprocessing: bytes → decoded image → fixed-size input tensor.

pub mod decode;
pub mod normalize;

pub use decode::decode_image;
pub use normalize::{fit_within, normalize, resize_and_pad, to_tensor, TargetSize, Tensor, PAD_COLOR};
