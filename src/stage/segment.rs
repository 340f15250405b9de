// 该文件是 PropZone （道具分区） 项目的一部分。
// src/stage/segment.rs - HSV 颜色分割
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

use image::{GrayImage, Luma, Rgb, RgbImage};
use serde::{Deserialize, Serialize};

use crate::frame::ChannelOrder;

/// 8 位 HSV 中色相的最大值（角度减半）
pub const HUE_MAX: u8 = 180;

const MASK_ON: u8 = u8::MAX;

/// 闭区间 HSV 范围，分量顺序为 [h, s, v]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvRange {
  pub lower: [u8; 3],
  pub upper: [u8; 3],
}

impl HsvRange {
  pub const fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
    Self { lower, upper }
  }

  pub fn contains(&self, hsv: &[u8; 3]) -> bool {
    hsv
      .iter()
      .zip(self.lower.iter().zip(self.upper.iter()))
      .all(|(value, (lower, upper))| lower <= value && value <= upper)
  }
}

/// RGB 转 8 位 HSV：h 取 0..=180（角度减半），s、v 取 0..=255
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> [u8; 3] {
  let (rf, gf, bf) = (r as f32, g as f32, b as f32);
  let v = rf.max(gf).max(bf);
  let min = rf.min(gf).min(bf);
  let delta = v - min;

  let s = if v > 0.0 { delta * 255.0 / v } else { 0.0 };

  let h = if delta == 0.0 {
    0.0
  } else if v == rf {
    60.0 * (gf - bf) / delta
  } else if v == gf {
    120.0 + 60.0 * (bf - rf) / delta
  } else {
    240.0 + 60.0 * (rf - gf) / delta
  };
  let h = if h < 0.0 { h + 360.0 } else { h };

  [(h / 2.0).round() as u8, s.round() as u8, v as u8]
}

/// 生成掩码：任一范围命中即为 255，否则为 0
///
/// 色相跨越 0 的目标（如红色）需要两个不相交的范围取并集。
pub fn in_range_mask(image: &RgbImage, order: ChannelOrder, ranges: &[HsvRange]) -> GrayImage {
  GrayImage::from_fn(image.width(), image.height(), |x, y| {
    let (r, g, b) = order.rgb(image.get_pixel(x, y));
    let hsv = rgb_to_hsv(r, g, b);
    if ranges.iter().any(|range| range.contains(&hsv)) {
      Luma([MASK_ON])
    } else {
      Luma([0])
    }
  })
}

/// 按掩码拷贝像素，掩码外置零
pub fn apply_mask(image: &RgbImage, mask: &GrayImage) -> RgbImage {
  RgbImage::from_fn(image.width(), image.height(), |x, y| {
    if mask.get_pixel(x, y)[0] > 0 {
      *image.get_pixel(x, y)
    } else {
      Rgb([0, 0, 0])
    }
  })
}

pub fn segment_color(image: &RgbImage, order: ChannelOrder, ranges: &[HsvRange]) -> RgbImage {
  let mask = in_range_mask(image, order, ranges);
  apply_mask(image, &mask)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn primary_colors() {
    assert_eq!(rgb_to_hsv(255, 0, 0), [0, 255, 255]);
    assert_eq!(rgb_to_hsv(0, 255, 0), [60, 255, 255]);
    assert_eq!(rgb_to_hsv(0, 0, 255), [120, 255, 255]);
    assert_eq!(rgb_to_hsv(255, 0, 255), [150, 255, 255]);
  }

  #[test]
  fn grey_has_no_hue_or_saturation() {
    assert_eq!(rgb_to_hsv(0, 0, 0), [0, 0, 0]);
    assert_eq!(rgb_to_hsv(128, 128, 128), [0, 0, 128]);
  }

  #[test]
  fn hue_near_origin_wraps_to_top_of_range() {
    // 355.3 度
    assert_eq!(rgb_to_hsv(255, 0, 20), [178, 255, 255]);
  }

  #[test]
  fn range_bounds_are_inclusive() {
    let range = HsvRange::new([10, 20, 30], [40, 50, 60]);
    assert!(range.contains(&[10, 20, 30]));
    assert!(range.contains(&[40, 50, 60]));
    assert!(!range.contains(&[9, 20, 30]));
    assert!(!range.contains(&[40, 51, 60]));
  }

  #[test]
  fn two_ranges_are_combined_with_or() {
    let low = HsvRange::new([0, 34, 0], [12, 255, 255]);
    let high = HsvRange::new([173, 34, 0], [180, 255, 255]);
    let mut image = RgbImage::new(3, 1);
    image.put_pixel(0, 0, Rgb([255, 0, 0]));
    image.put_pixel(1, 0, Rgb([255, 0, 20]));
    image.put_pixel(2, 0, Rgb([0, 0, 255]));

    let only_low = in_range_mask(&image, ChannelOrder::Rgb, &[low]);
    assert_eq!(only_low.as_raw(), &vec![255, 0, 0]);

    let both = in_range_mask(&image, ChannelOrder::Rgb, &[low, high]);
    assert_eq!(both.as_raw(), &vec![255, 255, 0]);
  }

  #[test]
  fn channel_order_changes_interpretation() {
    let blue = HsvRange::new([87, 37, 50], [131, 255, 255]);
    let image = RgbImage::from_pixel(1, 1, Rgb([255, 0, 0]));
    assert_eq!(in_range_mask(&image, ChannelOrder::Rgb, &[blue])[(0, 0)][0], 0);
    assert_eq!(in_range_mask(&image, ChannelOrder::Bgr, &[blue])[(0, 0)][0], 255);
  }

  #[test]
  fn masked_frame_keeps_matching_pixels() {
    let red = HsvRange::new([0, 34, 0], [12, 255, 255]);
    let mut image = RgbImage::from_pixel(4, 1, Rgb([0, 200, 0]));
    image.put_pixel(1, 0, Rgb([200, 10, 10]));

    let masked = segment_color(&image, ChannelOrder::Rgb, &[red]);
    assert_eq!(*masked.get_pixel(1, 0), Rgb([200, 10, 10]));
    assert_eq!(*masked.get_pixel(0, 0), Rgb([0, 0, 0]));
    assert_eq!(*masked.get_pixel(3, 0), Rgb([0, 0, 0]));
  }
}
