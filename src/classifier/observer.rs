// 该文件是 PropZone （道具分区） 项目的一部分。
// src/classifier/observer.rs - 管线观察者
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

use std::time::Duration;

use tracing::{debug, info};

use crate::classifier::Classification;

/// 在管线固定节点被调用的回调，全部为空实现
pub trait PipelineObserver {
  /// 开始处理一帧
  fn on_start(&self, _width: u32, _height: u32) {}

  /// 轮廓提取与过滤完成
  fn on_contours(&self, _found: usize, _kept: usize) {}

  /// 一帧处理完成
  fn on_finish(&self, _result: &Classification, _elapsed: Duration) {}
}

/// 通过 tracing 输出日志
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
  fn on_start(&self, width: u32, height: u32) {
    debug!("处理帧: {}x{}", width, height);
  }

  fn on_contours(&self, found: usize, kept: usize) {
    debug!("轮廓: 提取 {} 个, 保留 {} 个", found, kept);
  }

  fn on_finish(&self, result: &Classification, elapsed: Duration) {
    info!(
      "识别结果: {} ({}), 耗时: {:.2?}",
      result.zone,
      result.code(),
      elapsed
    );
  }
}
