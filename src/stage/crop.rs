// 该文件是 PropZone （道具分区） 项目的一部分。
// src/stage/crop.rs - 感兴趣区域裁剪
//
// 本文件根据 Apache 许可证第 2.0 版（以下简称“许可证”）授权使用；
// 除非遵守该许可证条款，否则您不得使用本文件。
// 您可通过以下网址获取许可证副本：
// http://www.apache.org/licenses/LICENSE-2.0
// 除非适用法律要求或书面同意，根据本许可协议分发的软件均按“原样”提供，
// 不附带任何形式的明示或暗示的保证或条件。
// 有关许可权限与限制的具体条款，请参阅本许可协议。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, Wareless Group

use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};

const BLANK: Rgb<u8> = Rgb([0, 0, 0]);

/// 感兴趣区域，像素坐标，左闭右开
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
  pub left: u32,
  pub right: u32,
  pub top: u32,
  pub bottom: u32,
}

impl CropRect {
  pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
    Self {
      left,
      right,
      top,
      bottom,
    }
  }

  /// 覆盖整幅图像的区域，裁剪时不改变任何像素
  pub const fn full(width: u32, height: u32) -> Self {
    Self::new(0, width, 0, height)
  }

  pub fn is_empty(&self) -> bool {
    self.left >= self.right || self.top >= self.bottom
  }

  pub fn contains(&self, x: u32, y: u32) -> bool {
    x >= self.left && x < self.right && y >= self.top && y < self.bottom
  }
}

/// 将区域外的像素置零，区域内像素保持不变
///
/// 边界超出图像时按图像尺寸截断，因此位于图像边缘的边界不会清除任何像素。
pub fn crop_region(image: &RgbImage, rect: &CropRect) -> RgbImage {
  let (width, height) = image.dimensions();
  let clamped = CropRect::new(
    rect.left.min(width),
    rect.right.min(width),
    rect.top.min(height),
    rect.bottom.min(height),
  );

  let mut cropped = image.clone();
  for (x, y, pixel) in cropped.enumerate_pixels_mut() {
    if !clamped.contains(x, y) {
      *pixel = BLANK;
    }
  }
  cropped
}

#[cfg(test)]
mod tests {
  use super::*;

  fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
      Rgb([(x % 251) as u8 + 1, (y % 251) as u8 + 1, 200])
    })
  }

  #[test]
  fn full_frame_rect_is_noop() {
    let image = gradient(320, 240);
    let cropped = crop_region(&image, &CropRect::full(320, 240));
    assert_eq!(cropped, image);
  }

  #[test]
  fn oversized_rect_is_noop() {
    let image = gradient(40, 30);
    let cropped = crop_region(&image, &CropRect::new(0, 1000, 0, 1000));
    assert_eq!(cropped, image);
  }

  #[test]
  fn pixels_outside_rect_are_blanked() {
    let image = gradient(20, 10);
    let rect = CropRect::new(5, 15, 2, 8);
    let cropped = crop_region(&image, &rect);

    for (x, y, pixel) in cropped.enumerate_pixels() {
      if rect.contains(x, y) {
        assert_eq!(pixel, image.get_pixel(x, y), "({x}, {y}) 不应被修改");
      } else {
        assert_eq!(*pixel, BLANK, "({x}, {y}) 应被清除");
      }
    }
  }

  #[test]
  fn right_and_bottom_bounds_are_exclusive() {
    let image = gradient(10, 10);
    let cropped = crop_region(&image, &CropRect::new(0, 5, 0, 5));
    assert_ne!(*cropped.get_pixel(4, 4), BLANK);
    assert_eq!(*cropped.get_pixel(5, 4), BLANK);
    assert_eq!(*cropped.get_pixel(4, 5), BLANK);
  }

  #[test]
  fn empty_rect() {
    assert!(CropRect::new(5, 5, 0, 10).is_empty());
    assert!(CropRect::new(0, 10, 7, 3).is_empty());
    assert!(!CropRect::full(1, 1).is_empty());
  }
}
