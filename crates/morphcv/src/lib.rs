#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use morphcv_image as image;

#[doc(inline)]
pub use morphcv_imgproc as imgproc;
