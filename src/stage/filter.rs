// 该文件是 PropZone （道具分区） 项目的一部分。
// src/stage/filter.rs - 轮廓过滤
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

use serde::{Deserialize, Serialize};

use crate::stage::contour::Contour;

fn open_perimeter_min() -> f64 {
  -1.0
}

fn open_perimeter_max() -> f64 {
  f64::INFINITY
}

/// 轮廓接受范围，所有边界均为开区间
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContourEnvelope {
  pub area_min: f64,
  pub area_max: f64,
  #[serde(default = "open_perimeter_min")]
  pub perimeter_min: f64,
  #[serde(default = "open_perimeter_max")]
  pub perimeter_max: f64,
}

impl ContourEnvelope {
  /// 只限制面积，周长不设限
  pub fn with_area(area_min: f64, area_max: f64) -> Self {
    Self {
      area_min,
      area_max,
      perimeter_min: open_perimeter_min(),
      perimeter_max: open_perimeter_max(),
    }
  }

  pub fn accepts(&self, area: f64, perimeter: f64) -> bool {
    area > self.area_min
      && area < self.area_max
      && perimeter > self.perimeter_min
      && perimeter < self.perimeter_max
  }
}

/// 保留落在范围内的轮廓，保持输入顺序
///
/// 下界去除传感器噪点，上界去除背景渗色形成的大区域。
pub fn filter_contours(contours: &[Contour], envelope: &ContourEnvelope) -> Vec<Contour> {
  contours
    .iter()
    .filter(|contour| envelope.accepts(contour.area(), contour.perimeter()))
    .cloned()
    .collect()
}
