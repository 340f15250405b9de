// 该文件是 PropZone （道具分区） 项目的一部分。
// src/config.rs - 管线配置
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

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::{
  FromUrl,
  frame::ChannelOrder,
  stage::{
    AreaBand, ContourEnvelope, CropRect, HsvRange, SideBands, ZoneBands, segment::HUE_MAX,
  },
  url_file_path,
};

const PRESET_SCHEME: &str = "preset";
const TOML_SCHEME: &str = "toml";

#[derive(Error, Debug)]
pub enum ConfigError {
  #[error("HSV 范围数量必须为 1 或 2, 实际为 {0}")]
  HsvRangeCount(usize),
  #[error("HSV 范围下界大于上界: {lower:?} > {upper:?}")]
  HsvRangeInverted { lower: [u8; 3], upper: [u8; 3] },
  #[error("色相超出 0..={max}: {0}", max = HUE_MAX)]
  HueOutOfRange(u8),
  #[error("裁剪区域为空: {0:?}")]
  EmptyCrop(CropRect),
  #[error("轮廓接受范围无效: ({0}, {1})")]
  InvalidEnvelope(f64, f64),
  #[error("面积区间无效: [{0}, {1}]")]
  InvalidBand(i64, i64),
  #[error("未知预设: {0}")]
  UnknownPreset(String),
  #[error("URI 方案不匹配: {0}")]
  SchemeMismatch(String),
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("TOML 解析错误: {0}")]
  TomlError(#[from] toml::de::Error),
}

/// 单个颜色变体的全部参数，管线生命周期内不可变
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
  /// 输入帧的通道顺序
  #[serde(default)]
  pub channel_order: ChannelOrder,
  /// 感兴趣区域
  pub crop: CropRect,
  /// 一个或两个 HSV 范围，两个时取并集
  pub hsv_ranges: Vec<HsvRange>,
  /// 轮廓面积 / 周长接受范围
  pub envelope: ContourEnvelope,
  /// 左侧与中间位置的面积区间
  pub bands: ZoneBands,
}

impl PipelineConfig {
  /// 红色道具
  pub fn red() -> Self {
    let side = SideBands::new(AreaBand::new(0, 700), AreaBand::new(700, 10000));
    Self {
      channel_order: ChannelOrder::Rgb,
      crop: CropRect::new(0, 320, 103, 240),
      hsv_ranges: vec![
        HsvRange::new([0, 34, 0], [12, 255, 255]),
        HsvRange::new([173, 34, 0], [180, 255, 255]),
      ],
      envelope: ContourEnvelope::with_area(300.0, 10000.0),
      bands: ZoneBands {
        left: side,
        center: side,
      },
    }
  }

  /// 蓝色道具
  pub fn blue() -> Self {
    let side = SideBands::new(AreaBand::new(0, 10), AreaBand::new(100, 10000));
    Self {
      channel_order: ChannelOrder::Rgb,
      crop: CropRect::new(0, 320, 133, 240),
      hsv_ranges: vec![HsvRange::new([87, 37, 50], [131, 255, 255])],
      envelope: ContourEnvelope::with_area(100.0, 10000.0),
      bands: ZoneBands {
        left: side,
        center: side,
      },
    }
  }

  pub fn preset(name: &str) -> Result<Self, ConfigError> {
    match name {
      "red" => Ok(Self::red()),
      "blue" => Ok(Self::blue()),
      _ => Err(ConfigError::UnknownPreset(name.to_string())),
    }
  }

  pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
    let config: Self = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
  }

  pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    info!("加载配置文件: {}", path.display());
    let text = std::fs::read_to_string(path)?;
    Self::from_toml_str(&text)
  }

  /// 检查配置；任何错误都是致命的，不能按帧恢复
  pub fn validate(&self) -> Result<(), ConfigError> {
    if !(1..=2).contains(&self.hsv_ranges.len()) {
      return Err(ConfigError::HsvRangeCount(self.hsv_ranges.len()));
    }
    for range in &self.hsv_ranges {
      if range.lower.iter().zip(range.upper.iter()).any(|(l, u)| l > u) {
        return Err(ConfigError::HsvRangeInverted {
          lower: range.lower,
          upper: range.upper,
        });
      }
      if range.upper[0] > HUE_MAX {
        return Err(ConfigError::HueOutOfRange(range.upper[0]));
      }
    }

    if self.crop.is_empty() {
      return Err(ConfigError::EmptyCrop(self.crop));
    }

    let envelope = &self.envelope;
    if !(envelope.area_min < envelope.area_max) {
      return Err(ConfigError::InvalidEnvelope(
        envelope.area_min,
        envelope.area_max,
      ));
    }
    if !(envelope.perimeter_min < envelope.perimeter_max) {
      return Err(ConfigError::InvalidEnvelope(
        envelope.perimeter_min,
        envelope.perimeter_max,
      ));
    }

    for side in [&self.bands.left, &self.bands.center] {
      for band in [side.spike, side.prop] {
        if band.min > band.max {
          return Err(ConfigError::InvalidBand(band.min, band.max));
        }
      }
    }

    debug!("配置校验通过");
    Ok(())
  }
}

impl FromUrl for PipelineConfig {
  type Error = ConfigError;

  /// `preset://red`、`preset://blue` 或 `toml:///path/to/config.toml`
  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    match url.scheme() {
      PRESET_SCHEME => {
        let name = url.host_str().unwrap_or_default();
        info!("使用预设配置: {}", name);
        Self::preset(name)
      }
      TOML_SCHEME => Self::from_toml_file(url_file_path(url)?),
      other => Err(ConfigError::SchemeMismatch(format!(
        "期望 '{}' 或 '{}', 实际为 '{}'",
        PRESET_SCHEME, TOML_SCHEME, other
      ))),
    }
  }
}
