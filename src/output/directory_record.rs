// 该文件是 PropZone （道具分区） 项目的一部分。
// src/output/directory_record.rs - 目录记录输出
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

use std::path::PathBuf;
use std::sync::atomic::{AtomicU16, Ordering};

use chrono::Local;
use thiserror::Error;
use tracing::debug;

use crate::{
  FromUrl, FromUrlWithScheme,
  classifier::Classification,
  frame::Frame,
  output::{
    Render,
    draw::{Annotate, Record},
  },
  url_file_path,
};

#[derive(Error, Debug)]
pub enum DirectoryRecordOutputError {
  #[error("URI 方案不匹配")]
  SchemeMismatch,
  #[error("图像错误: {0}")]
  ImageError(#[from] image::ImageError),
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
}

/// 把每帧保存为带时间戳的图像，并在旁边写入 JSON 结果
///
/// `?raw` 保存原始帧而不绘制标注，`?always` 连 NONE 结果也保存。
pub struct DirectoryRecordOutput {
  directory: PathBuf,
  annotate: Option<Annotate>,
  frame_counter: AtomicU16,
  always: bool,
}

impl FromUrlWithScheme for DirectoryRecordOutput {
  const SCHEME: &'static str = "folder";
}

impl FromUrl for DirectoryRecordOutput {
  type Error = DirectoryRecordOutputError;

  fn from_url(uri: &url::Url) -> Result<Self, Self::Error> {
    if uri.scheme() != Self::SCHEME {
      return Err(DirectoryRecordOutputError::SchemeMismatch);
    }

    let raw = uri.query_pairs().any(|(k, _)| k == "raw");
    let always = uri.query_pairs().any(|(k, _)| k == "always");

    Ok(DirectoryRecordOutput {
      directory: url_file_path(uri)?,
      annotate: (!raw).then(Annotate::default),
      frame_counter: AtomicU16::new(0),
      always,
    })
  }
}

impl DirectoryRecordOutput {
  fn frame_id(&self) -> u16 {
    self.frame_counter.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
  }

  fn frame_path(&self) -> Result<PathBuf, DirectoryRecordOutputError> {
    if !self.directory.exists() {
      std::fs::create_dir_all(&self.directory)?;
    }

    let now = Local::now();
    Ok(self.directory.join(format!(
      "image_{}-{:04X}.jpg",
      now.format("%Y-%m-%d@%H-%M-%S"),
      self.frame_id()
    )))
  }
}

impl Render<Frame, Classification> for DirectoryRecordOutput {
  type Error = DirectoryRecordOutputError;

  fn render_result(&self, frame: &Frame, result: &Classification) -> Result<(), Self::Error> {
    if !self.always && result.is_none() {
      debug!("第 {} 帧无结果，跳过记录", frame.index);
      return Ok(());
    }

    let path = self.frame_path()?;
    match &self.annotate {
      Some(annotate) => annotate.annotate(&frame.image, result).save(&path)?,
      None => frame.image.save(&path)?,
    }
    Record.record(result, &path)?;
    debug!("记录第 {} 帧到 {}", frame.index, path.display());

    Ok(())
  }
}
