use crate::error::FrameError;
use crate::image::{GrayImage, ImageU8};

/// Foreground intensity of a binary mask.
pub const MASK_ON: u8 = 255;

/// Binary mask tagged with the class it represents.
///
/// Values are 0 or [`MASK_ON`]; the constructors below are the only way the
/// crate builds masks, and all of them keep to that invariant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorMask {
    pub class: String,
    pub image: GrayImage,
}

impl ColorMask {
    /// All-background mask.
    pub fn empty(class: impl Into<String>, w: usize, h: usize) -> Self {
        Self {
            class: class.into(),
            image: GrayImage::new(w, h),
        }
    }

    /// Build a mask from any gray image: non-zero pixels become [`MASK_ON`].
    pub fn from_gray(class: impl Into<String>, mut image: GrayImage) -> Self {
        for v in image.data.iter_mut() {
            *v = if *v != 0 { MASK_ON } else { 0 };
        }
        Self {
            class: class.into(),
            image,
        }
    }

    /// Build a mask from a predicate evaluated at every (x, y).
    pub fn from_fn(
        class: impl Into<String>,
        w: usize,
        h: usize,
        mut on: impl FnMut(usize, usize) -> bool,
    ) -> Self {
        let mut image = GrayImage::new(w, h);
        for y in 0..h {
            for x in 0..w {
                if on(x, y) {
                    image.set(x, y, MASK_ON);
                }
            }
        }
        Self {
            class: class.into(),
            image,
        }
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.image.w, self.image.h)
    }

    #[inline]
    pub fn is_on(&self, x: usize, y: usize) -> bool {
        self.image.get(x, y) != 0
    }

    pub fn view(&self) -> ImageU8<'_> {
        self.image.as_view()
    }

    pub fn count_on(&self) -> usize {
        self.image.count_nonzero()
    }

    /// OR `other` into `self` in place.
    pub fn or_assign(&mut self, other: &ColorMask) -> Result<(), FrameError> {
        if self.dims() != other.dims() {
            return Err(FrameError::DimensionMismatch {
                expected: self.dims(),
                actual: other.dims(),
            });
        }
        for (dst, &src) in self.image.data.iter_mut().zip(other.image.data.iter()) {
            *dst |= src;
        }
        Ok(())
    }
}

/// Logical OR of several masks into a new mask named `class`.
///
/// Values are combined with a bitwise OR on 0/255 samples, never added, so
/// overlapping inputs stay binary.
pub fn union_masks(class: &str, masks: &[&ColorMask]) -> Result<ColorMask, FrameError> {
    let first = masks.first().ok_or(FrameError::NoMasks("union_masks"))?;
    let (w, h) = first.dims();
    let mut out = ColorMask::empty(class, w, h);
    for mask in masks {
        out.or_assign(mask)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_of_overlapping_masks_stays_binary() {
        let a = ColorMask::from_fn("a", 4, 1, |x, _| x < 3);
        let b = ColorMask::from_fn("b", 4, 1, |x, _| x > 0);
        let u = union_masks("u", &[&a, &b]).unwrap();
        assert_eq!(u.image.data, vec![255, 255, 255, 255]);
        assert_eq!(u.class, "u");
    }

    #[test]
    fn union_rejects_mismatched_shapes() {
        let a = ColorMask::empty("a", 4, 4);
        let b = ColorMask::empty("b", 4, 3);
        assert!(matches!(
            union_masks("u", &[&a, &b]),
            Err(FrameError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn union_of_nothing_is_an_error() {
        assert_eq!(union_masks("u", &[]), Err(FrameError::NoMasks("union_masks")));
    }

    #[test]
    fn from_gray_normalises_to_mask_values() {
        let gray = GrayImage::from_raw(3, 1, vec![0, 7, 255]).unwrap();
        let m = ColorMask::from_gray("g", gray);
        assert_eq!(m.image.data, vec![0, 255, 255]);
    }
}
