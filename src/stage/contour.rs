// 该文件是 PropZone （道具分区） 项目的一部分。
// src/stage/contour.rs - 轮廓提取
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

use image::{GrayImage, Luma, RgbImage};
use imageproc::contours::BorderType;
use imageproc::geometry::{arc_length, contour_area};
use imageproc::point::Point;

use crate::frame::ChannelOrder;
use crate::stage::geometry::{Circle, min_enclosing_circle};

// 灰度权重 0.299 / 0.587 / 0.114，14 位定点
const GRAY_SHIFT: u32 = 14;
const GRAY_R: u32 = 4899;
const GRAY_G: u32 = 9617;
const GRAY_B: u32 = 1868;

/// 闭合轮廓
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
  points: Vec<Point<i32>>,
  hole: bool,
}

/// 轮廓的派生度量
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourMetrics {
  pub area: f64,
  pub perimeter: f64,
  pub circle: Circle,
}

impl Contour {
  pub fn new(points: Vec<Point<i32>>) -> Self {
    Self {
      points,
      hole: false,
    }
  }

  /// 由坐标列表构造
  pub fn from_coords(coords: &[(i32, i32)]) -> Self {
    Self::new(coords.iter().map(|&(x, y)| Point::new(x, y)).collect())
  }

  pub fn points(&self) -> &[Point<i32>] {
    &self.points
  }

  /// 是否为内边界（孔洞）
  pub fn is_hole(&self) -> bool {
    self.hole
  }

  /// 多边形面积，非负
  pub fn area(&self) -> f64 {
    if self.points.len() < 3 {
      return 0.0;
    }
    contour_area(&self.points).abs()
  }

  /// 闭合周长
  pub fn perimeter(&self) -> f64 {
    if self.points.len() < 2 {
      return 0.0;
    }
    arc_length(&self.points, true)
  }

  pub fn enclosing_circle(&self) -> Circle {
    min_enclosing_circle(&self.points)
  }

  pub fn metrics(&self) -> ContourMetrics {
    ContourMetrics {
      area: self.area(),
      perimeter: self.perimeter(),
      circle: self.enclosing_circle(),
    }
  }
}

/// 转为单通道亮度图
pub fn to_intensity(image: &RgbImage, order: ChannelOrder) -> GrayImage {
  GrayImage::from_fn(image.width(), image.height(), |x, y| {
    let (r, g, b) = order.rgb(image.get_pixel(x, y));
    let weighted = r as u32 * GRAY_R + g as u32 * GRAY_G + b as u32 * GRAY_B;
    Luma([((weighted + (1 << (GRAY_SHIFT - 1))) >> GRAY_SHIFT) as u8])
  })
}

/// 提取所有外边界与孔洞边界，顺序为检测顺序，没有语义
pub fn extract_contours(gray: &GrayImage) -> Vec<Contour> {
  imageproc::contours::find_contours::<i32>(gray)
    .into_iter()
    .map(|contour| Contour {
      hole: matches!(contour.border_type, BorderType::Hole),
      points: compress_runs(contour.points),
    })
    .collect()
}

pub fn find_contours(image: &RgbImage, order: ChannelOrder) -> Vec<Contour> {
  extract_contours(&to_intensity(image, order))
}

/// 压缩水平、竖直、对角方向的直线段，只保留端点
fn compress_runs(points: Vec<Point<i32>>) -> Vec<Point<i32>> {
  let n = points.len();
  if n < 3 {
    return points;
  }

  let step = |a: Point<i32>, b: Point<i32>| ((b.x - a.x).signum(), (b.y - a.y).signum());
  (0..n)
    .filter(|&i| {
      let prev = points[(i + n - 1) % n];
      let next = points[(i + 1) % n];
      step(prev, points[i]) != step(points[i], next)
    })
    .map(|i| points[i])
    .collect()
}
