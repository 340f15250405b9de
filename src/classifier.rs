// 该文件是 PropZone （道具分区） 项目的一部分。
// src/classifier.rs - 分类器接口与结果
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

use std::fmt;

use image::RgbImage;
use serde::{Deserialize, Serialize};

/// 单帧分类能力
///
/// 分类不会失败：证据不足时返回 [`Zone::None`]。
pub trait Classifier {
  fn classify(&self, image: &RgbImage) -> Classification;
}

impl<C: Classifier + ?Sized> Classifier for &C {
  fn classify(&self, image: &RgbImage) -> Classification {
    (**self).classify(image)
  }
}

/// 道具所在区域，编码 0..=3
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Zone {
  /// 无法判定
  #[default]
  None = 0,
  Left = 1,
  Center = 2,
  Right = 3,
}

impl Zone {
  pub fn code(self) -> u8 {
    self as u8
  }

  pub fn from_code(code: u8) -> Option<Self> {
    match code {
      0 => Some(Zone::None),
      1 => Some(Zone::Left),
      2 => Some(Zone::Center),
      3 => Some(Zone::Right),
      _ => None,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Zone::None => "NONE",
      Zone::Left => "LEFT",
      Zone::Center => "CENTER",
      Zone::Right => "RIGHT",
    }
  }
}

impl fmt::Display for Zone {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// 诊断标注点：外接圆圆心与标注颜色（RGB）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
  pub x: f64,
  pub y: f64,
  pub color: [u8; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneMarkers {
  pub left: Marker,
  pub center: Marker,
}

/// 单次分类结果，每次调用都完整替换上一次的结果
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Classification {
  pub zone: Zone,
  pub markers: Option<ZoneMarkers>,
}

impl Classification {
  pub fn none() -> Self {
    Self::default()
  }

  pub fn code(&self) -> u8 {
    self.zone.code()
  }

  pub fn is_none(&self) -> bool {
    self.zone == Zone::None
  }
}

mod observer;
mod prop_pipeline;

pub use self::observer::{PipelineObserver, TracingObserver};
pub use self::prop_pipeline::{PipelineTrace, PropPipeline, PropPipelineBuilder};
