// 该文件是 PropZone （道具分区） 项目的一部分。
// src/stage/zone.rs - 区域判定
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

use crate::classifier::{Classification, Marker, Zone, ZoneMarkers};
use crate::stage::contour::{Contour, ContourMetrics};

/// 判定为标记线（spike）一侧的标注颜色
pub const SPIKE_COLOR: [u8; 3] = [255, 255, 0];
/// 判定为道具或未匹配一侧的标注颜色
pub const PROP_COLOR: [u8; 3] = [0, 255, 0];

/// 面积闭区间
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaBand {
  pub min: i64,
  pub max: i64,
}

impl AreaBand {
  pub const fn new(min: i64, max: i64) -> Self {
    Self { min, max }
  }

  pub fn contains(&self, area: i64) -> bool {
    self.min <= area && area <= self.max
  }
}

/// 单侧的标记线 / 道具面积区间
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideBands {
  pub spike: AreaBand,
  pub prop: AreaBand,
}

/// 单侧的匹配结果，区间重叠时两者可同时成立
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SideMatch {
  pub spike: bool,
  pub prop: bool,
}

impl SideBands {
  pub const fn new(spike: AreaBand, prop: AreaBand) -> Self {
    Self { spike, prop }
  }

  /// 面积先截断为整数再比较
  pub fn classify(&self, area: f64) -> SideMatch {
    let area = area as i64;
    SideMatch {
      spike: self.spike.contains(area),
      prop: self.prop.contains(area),
    }
  }
}

/// 左侧与中间位置各自的面积区间
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneBands {
  pub left: SideBands,
  pub center: SideBands,
}

/// 判定表，按顺序匹配
///
/// 右侧位置不在视野内，两侧都是标记线时由排除法得出。
pub fn decide(left: SideMatch, center: SideMatch) -> Zone {
  if left.spike && center.spike {
    Zone::Right
  } else if left.prop && center.spike {
    Zone::Left
  } else if left.spike && center.prop {
    Zone::Center
  } else {
    Zone::None
  }
}

fn marker(metrics: &ContourMetrics, side: SideMatch) -> Marker {
  Marker {
    x: metrics.circle.x,
    y: metrics.circle.y,
    color: if side.spike { SPIKE_COLOR } else { PROP_COLOR },
  }
}

/// 对过滤后的轮廓做区域判定
///
/// 轮廓数不为 2 时直接返回 NONE。两个轮廓按外接圆圆心 x 排序，
/// x 相同时依次比较 y 与面积，结果与提取顺序无关。
pub fn classify_zones(contours: &[Contour], bands: &ZoneBands) -> Classification {
  let [first, second] = contours else {
    return Classification::none();
  };

  let (a, b) = (first.metrics(), second.metrics());
  let ordering = a
    .circle
    .x
    .total_cmp(&b.circle.x)
    .then(a.circle.y.total_cmp(&b.circle.y))
    .then(a.area.total_cmp(&b.area));
  let (left, center) = if ordering.is_gt() { (b, a) } else { (a, b) };

  let left_match = bands.left.classify(left.area);
  let center_match = bands.center.classify(center.area);
  let zone = decide(left_match, center_match);
  if zone == Zone::None {
    return Classification::none();
  }

  Classification {
    zone,
    markers: Some(ZoneMarkers {
      left: marker(&left, left_match),
      center: marker(&center, center_match),
    }),
  }
}
