// 该文件是 PropZone （道具分区） 项目的一部分。
// src/lib.rs - 库主文件
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

pub mod classifier;
pub mod config;
pub mod frame;
pub mod input;
pub mod output;
pub mod stage;
pub mod task;

pub trait FromUrl {
  type Error;
  fn from_url(url: &url::Url) -> Result<Self, Self::Error>
  where
    Self: Sized;
}

pub trait FromUrlWithScheme: FromUrl {
  const SCHEME: &'static str;
}

/// 取出 URL 中的文件路径并做百分号解码
///
/// `Url::path` 保留 `%20` 等转义，直接交给文件系统会找不到含空格或非 ASCII 字符的路径。
pub fn url_file_path(url: &url::Url) -> std::io::Result<std::path::PathBuf> {
  let path = urlencoding::decode(url.path())
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
  Ok(std::path::PathBuf::from(path.into_owned()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decodes_spaces_and_non_ascii() {
    let url = url::Url::parse("image:///tmp/比赛 记录/frame 1.png").expect("URL 无效");
    assert_eq!(url.path(), "/tmp/%E6%AF%94%E8%B5%9B%20%E8%AE%B0%E5%BD%95/frame%201.png");
    assert_eq!(
      url_file_path(&url).expect("解码失败"),
      std::path::PathBuf::from("/tmp/比赛 记录/frame 1.png")
    );
  }

  #[test]
  fn rejects_invalid_utf8() {
    let url = url::Url::parse("image:///tmp/%FF.png").expect("URL 无效");
    assert!(url_file_path(&url).is_err());
  }
}
