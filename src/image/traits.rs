//! Row-oriented access shared by every raster type in the crate.
//!
//! Masks, frames and float buffers all expose their pixels row by row so the
//! filters and tracers can be written once against [`ImageView`].

pub trait ImageView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn stride(&self) -> usize;

    fn row(&self, y: usize) -> &[Self::Pixel];

    fn dims(&self) -> (usize, usize) {
        (self.width(), self.height())
    }
}

pub trait ImageViewMut: ImageView {
    fn row_mut(&mut self, y: usize) -> &mut [Self::Pixel];
}
