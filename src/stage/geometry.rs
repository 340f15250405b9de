// 该文件是 PropZone （道具分区） 项目的一部分。
// src/stage/geometry.rs - 最小外接圆
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

use imageproc::point::Point;

// 判断点是否在圆内时允许的相对误差
const CONTAINS_EPSILON: f64 = 1e-7;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Circle {
  pub x: f64,
  pub y: f64,
  pub radius: f64,
}

impl Circle {
  fn at(point: (f64, f64)) -> Self {
    Circle {
      x: point.0,
      y: point.1,
      radius: 0.0,
    }
  }

  fn from_diameter(a: (f64, f64), b: (f64, f64)) -> Self {
    let x = (a.0 + b.0) / 2.0;
    let y = (a.1 + b.1) / 2.0;
    Circle {
      x,
      y,
      radius: (a.0 - x).hypot(a.1 - y),
    }
  }

  fn circumscribe(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> Self {
    let (bx, by) = (b.0 - a.0, b.1 - a.1);
    let (cx, cy) = (c.0 - a.0, c.1 - a.1);
    let d = 2.0 * (bx * cy - by * cx);

    // 三点共线，取最远两点为直径
    if d.abs() < f64::EPSILON {
      return [
        Circle::from_diameter(a, b),
        Circle::from_diameter(a, c),
        Circle::from_diameter(b, c),
      ]
      .into_iter()
      .fold(Circle::at(a), |best, circle| {
        if circle.radius > best.radius {
          circle
        } else {
          best
        }
      });
    }

    let b2 = bx * bx + by * by;
    let c2 = cx * cx + cy * cy;
    let ux = (cy * b2 - by * c2) / d;
    let uy = (bx * c2 - cx * b2) / d;
    Circle {
      x: a.0 + ux,
      y: a.1 + uy,
      radius: ux.hypot(uy),
    }
  }

  pub fn contains(&self, point: (f64, f64)) -> bool {
    let distance = (point.0 - self.x).hypot(point.1 - self.y);
    distance <= self.radius * (1.0 + CONTAINS_EPSILON) + CONTAINS_EPSILON
  }
}

/// 点集的最小外接圆（增量 Welzl 算法）
///
/// 空点集返回原点处半径为 0 的圆。
pub fn min_enclosing_circle(points: &[Point<i32>]) -> Circle {
  let points: Vec<(f64, f64)> = points.iter().map(|p| (p.x as f64, p.y as f64)).collect();
  let Some(&first) = points.first() else {
    return Circle::default();
  };

  let mut circle = Circle::at(first);
  for i in 1..points.len() {
    if circle.contains(points[i]) {
      continue;
    }
    circle = Circle::at(points[i]);
    for j in 0..i {
      if circle.contains(points[j]) {
        continue;
      }
      circle = Circle::from_diameter(points[i], points[j]);
      for k in 0..j {
        if !circle.contains(points[k]) {
          circle = Circle::circumscribe(points[i], points[j], points[k]);
        }
      }
    }
  }
  circle
}
