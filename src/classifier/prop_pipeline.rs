// 该文件是 PropZone （道具分区） 项目的一部分。
// src/classifier/prop_pipeline.rs - 道具分区管线
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

use std::time::Instant;

use image::RgbImage;
use tracing::info;
use url::Url;

use crate::{
  FromUrl,
  classifier::{Classification, Classifier, PipelineObserver},
  config::{ConfigError, PipelineConfig},
  stage::{Contour, classify_zones, crop_region, filter_contours, find_contours, segment_color},
};

/// 一帧各阶段的中间结果
#[derive(Debug, Clone)]
pub struct PipelineTrace {
  /// 裁剪并按颜色分割后的帧
  pub masked: RgbImage,
  /// 提取出的全部轮廓
  pub contours: Vec<Contour>,
  /// 通过过滤的轮廓
  pub kept: Vec<Contour>,
  pub classification: Classification,
}

/// 裁剪 -> 颜色分割 -> 轮廓提取 -> 轮廓过滤 -> 区域判定
///
/// 红色、蓝色道具共用同一实现，差别只在 [`PipelineConfig`]。
pub struct PropPipeline {
  config: PipelineConfig,
  observer: Option<Box<dyn PipelineObserver + Send + Sync>>,
}

impl std::fmt::Debug for PropPipeline {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("PropPipeline")
      .field("config", &self.config)
      .field("observer", &self.observer.is_some())
      .finish()
  }
}

impl PropPipeline {
  pub fn new(config: PipelineConfig) -> Result<Self, ConfigError> {
    PropPipelineBuilder::new(config).build()
  }

  pub fn config(&self) -> &PipelineConfig {
    &self.config
  }

  /// 运行完整管线并保留中间结果
  pub fn trace(&self, image: &RgbImage) -> PipelineTrace {
    let now = Instant::now();
    if let Some(observer) = &self.observer {
      observer.on_start(image.width(), image.height());
    }

    let config = &self.config;
    let cropped = crop_region(image, &config.crop);
    let masked = segment_color(&cropped, config.channel_order, &config.hsv_ranges);
    let contours = find_contours(&masked, config.channel_order);
    let kept = filter_contours(&contours, &config.envelope);
    if let Some(observer) = &self.observer {
      observer.on_contours(contours.len(), kept.len());
    }

    let classification = classify_zones(&kept, &config.bands);
    if let Some(observer) = &self.observer {
      observer.on_finish(&classification, now.elapsed());
    }

    PipelineTrace {
      masked,
      contours,
      kept,
      classification,
    }
  }
}

/// 已经跑完管线的帧直接给出结果，不再重复计算
impl Classifier for PipelineTrace {
  fn classify(&self, _image: &RgbImage) -> Classification {
    self.classification
  }
}

impl Classifier for PropPipeline {
  fn classify(&self, image: &RgbImage) -> Classification {
    self.trace(image).classification
  }
}

pub struct PropPipelineBuilder {
  config: PipelineConfig,
  observer: Option<Box<dyn PipelineObserver + Send + Sync>>,
}

impl FromUrl for PropPipelineBuilder {
  type Error = ConfigError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    Ok(Self::new(PipelineConfig::from_url(url)?))
  }
}

impl PropPipelineBuilder {
  pub fn new(config: PipelineConfig) -> Self {
    Self {
      config,
      observer: None,
    }
  }

  pub fn observer(mut self, observer: impl PipelineObserver + Send + Sync + 'static) -> Self {
    self.observer = Some(Box::new(observer));
    self
  }

  /// 校验配置并创建管线，配置错误在此处报告而不是在处理帧时
  pub fn build(self) -> Result<PropPipeline, ConfigError> {
    self.config.validate()?;
    info!(
      "管线已创建: 通道顺序 {:?}, 裁剪区域 {:?}, HSV 范围 {} 个",
      self.config.channel_order,
      self.config.crop,
      self.config.hsv_ranges.len()
    );
    Ok(PropPipeline {
      config: self.config,
      observer: self.observer,
    })
  }
}
