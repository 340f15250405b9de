// 该文件是 PropZone （道具分区） 项目的一部分。
// src/frame.rs - 帧定义
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

/// 三通道像素在缓冲区中的排列顺序
///
/// 文件解码得到的图像是 RGB，部分相机驱动交付的是 BGR，
/// 分类器按配置解释像素，不做隐式转换。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
  #[default]
  Rgb,
  Bgr,
}

impl ChannelOrder {
  /// 按 (r, g, b) 顺序取出像素分量
  pub fn rgb(self, pixel: &Rgb<u8>) -> (u8, u8, u8) {
    let [c0, c1, c2] = pixel.0;
    match self {
      ChannelOrder::Rgb => (c0, c1, c2),
      ChannelOrder::Bgr => (c2, c1, c0),
    }
  }

  /// 把 (r, g, b) 写回为该顺序下的像素
  pub fn pixel(self, r: u8, g: u8, b: u8) -> Rgb<u8> {
    match self {
      ChannelOrder::Rgb => Rgb([r, g, b]),
      ChannelOrder::Bgr => Rgb([b, g, r]),
    }
  }
}

/// 帧数据
#[derive(Debug, Clone)]
pub struct Frame {
  /// 三通道图像数据
  pub image: RgbImage,
  /// 帧索引
  pub index: u64,
  /// 时间戳（毫秒）
  pub timestamp_ms: u64,
}

impl Frame {
  pub fn new(image: RgbImage, index: u64, timestamp_ms: u64) -> Self {
    Self {
      image,
      index,
      timestamp_ms,
    }
  }

  pub fn width(&self) -> u32 {
    self.image.width()
  }

  pub fn height(&self) -> u32 {
    self.image.height()
  }
}

impl From<RgbImage> for Frame {
  fn from(image: RgbImage) -> Self {
    Frame::new(image, 0, 0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bgr_order_swaps_outer_channels() {
    let pixel = Rgb([10, 20, 30]);
    assert_eq!(ChannelOrder::Rgb.rgb(&pixel), (10, 20, 30));
    assert_eq!(ChannelOrder::Bgr.rgb(&pixel), (30, 20, 10));
    assert_eq!(ChannelOrder::Bgr.pixel(30, 20, 10), pixel);
  }
}
