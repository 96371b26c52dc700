#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use rasterix_image as image;

#[doc(inline)]
pub use rasterix_imgproc as imgproc;
