// 该文件是 PropZone （道具分区） 项目的一部分。
// src/input/folder_input.rs - 目录图像序列输入
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

use std::path::{Path, PathBuf};
use std::time::Instant;

use image::{ImageReader, RgbImage};
use thiserror::Error;
use tracing::{error, info};
use url::Url;

use crate::{FromUrl, FromUrlWithScheme, frame::Frame, url_file_path};

const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "bmp", "webp"];

#[derive(Error, Debug)]
pub enum FolderInputError {
  #[error("URI 方案不匹配")]
  SchemeMismatch,
  #[error("目录中没有图像文件: {0}")]
  Empty(String),
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("图像错误: {0}")]
  ImageError(#[from] image::ImageError),
}

/// 按文件名顺序逐帧读取目录中的图像
///
/// 无法解码的文件记录错误后跳过。
pub struct FolderInput {
  files: std::vec::IntoIter<PathBuf>,
  index: u64,
  started: Instant,
}

impl FromUrlWithScheme for FolderInput {
  const SCHEME: &'static str = "folder";
}

impl FromUrl for FolderInput {
  type Error = FolderInputError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    if url.scheme() != Self::SCHEME {
      return Err(FolderInputError::SchemeMismatch);
    }

    let directory = url_file_path(url)?;
    let mut files = Vec::new();
    for entry in std::fs::read_dir(&directory)? {
      let path = entry?.path();
      if path.is_file() && is_image(&path) {
        files.push(path);
      }
    }
    if files.is_empty() {
      return Err(FolderInputError::Empty(directory.display().to_string()));
    }
    files.sort();
    info!("目录 {} 中共有 {} 张图像", directory.display(), files.len());

    Ok(FolderInput {
      files: files.into_iter(),
      index: 0,
      started: Instant::now(),
    })
  }
}

fn is_image(path: &Path) -> bool {
  path
    .extension()
    .and_then(|ext| ext.to_str())
    .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
    .unwrap_or(false)
}

fn load(path: &Path) -> Result<RgbImage, FolderInputError> {
  Ok(ImageReader::open(path)?.decode()?.to_rgb8())
}

impl Iterator for FolderInput {
  type Item = Frame;

  fn next(&mut self) -> Option<Self::Item> {
    for path in self.files.by_ref() {
      match load(&path) {
        Ok(image) => {
          let frame = Frame::new(image, self.index, self.started.elapsed().as_millis() as u64);
          self.index += 1;
          return Some(frame);
        }
        Err(e) => error!("跳过无法读取的图像 {}: {}", path.display(), e),
      }
    }
    None
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use image::Rgb;

  fn folder_url(path: &Path) -> Url {
    Url::parse(&format!("folder://{}", path.display())).expect("URL 无效")
  }

  #[test]
  fn reads_images_in_name_order_and_skips_others() {
    let dir = tempfile::tempdir().expect("创建临时目录失败");
    RgbImage::from_pixel(4, 4, Rgb([2, 0, 0]))
      .save(dir.path().join("b.png"))
      .expect("保存失败");
    RgbImage::from_pixel(4, 4, Rgb([1, 0, 0]))
      .save(dir.path().join("a.png"))
      .expect("保存失败");
    std::fs::write(dir.path().join("notes.txt"), "not an image").expect("写入失败");
    std::fs::write(dir.path().join("c.png"), "broken").expect("写入失败");

    let frames: Vec<Frame> = FolderInput::from_url(&folder_url(dir.path()))
      .expect("打开目录失败")
      .collect();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].image.get_pixel(0, 0)[0], 1);
    assert_eq!(frames[1].image.get_pixel(0, 0)[0], 2);
    assert_eq!((frames[0].index, frames[1].index), (0, 1));
  }

  #[test]
  fn directory_with_space_in_name() {
    let dir = tempfile::tempdir().expect("创建临时目录失败");
    let frames = dir.path().join("比赛 帧");
    std::fs::create_dir(&frames).expect("创建目录失败");
    RgbImage::new(4, 4)
      .save(frames.join("a.png"))
      .expect("保存失败");

    let input = FolderInput::from_url(&folder_url(&frames)).expect("打开目录失败");
    assert_eq!(input.count(), 1);
  }

  #[test]
  fn empty_directory_is_an_error() {
    let dir = tempfile::tempdir().expect("创建临时目录失败");
    assert!(matches!(
      FolderInput::from_url(&folder_url(dir.path())),
      Err(FolderInputError::Empty(_))
    ));
  }
}
