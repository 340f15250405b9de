// 该文件是 PropZone （道具分区） 项目的一部分。
// src/output/draw.rs - 识别结果可视化
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

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_circle_mut;
use serde::Serialize;

use crate::classifier::{Classification, Marker};

const MARKER_RADIUS: i32 = 3;
const MARKER_THICKNESS: i32 = 3;

/// 在帧上绘制左侧与中间位置的外接圆圆心
pub struct Annotate {
  radius: i32,
  thickness: i32,
}

impl Default for Annotate {
  fn default() -> Self {
    Self {
      radius: MARKER_RADIUS,
      thickness: MARKER_THICKNESS,
    }
  }
}

impl Annotate {
  pub fn with_radius(mut self, radius: i32) -> Self {
    self.radius = radius;
    self
  }

  pub fn with_thickness(mut self, thickness: i32) -> Self {
    self.thickness = thickness;
    self
  }

  // 以 radius 为中线、thickness 为宽度画圆环
  fn draw_marker(&self, image: &mut RgbImage, marker: &Marker) {
    let center = (marker.x.round() as i32, marker.y.round() as i32);
    let inner = (self.radius - self.thickness / 2).max(0);
    let outer = inner + self.thickness.max(1) - 1;
    for radius in inner..=outer {
      draw_hollow_circle_mut(image, center, radius, Rgb(marker.color));
    }
  }

  pub fn draw_markers_on_image(&self, image: &mut RgbImage, result: &Classification) {
    if let Some(markers) = &result.markers {
      self.draw_marker(image, &markers.left);
      self.draw_marker(image, &markers.center);
    }
  }

  /// 返回带标注的副本，原帧不变
  pub fn annotate(&self, image: &RgbImage, result: &Classification) -> RgbImage {
    let mut annotated = image.clone();
    self.draw_markers_on_image(&mut annotated, result);
    annotated
  }
}

#[derive(Serialize)]
struct RecordEntry<'a> {
  code: u8,
  #[serde(flatten)]
  result: &'a Classification,
}

/// 将识别结果以 JSON 写在图像旁边
pub struct Record;

impl Record {
  pub fn record(&self, result: &Classification, path: &Path) -> Result<(), std::io::Error> {
    let entry = RecordEntry {
      code: result.code(),
      result,
    };
    let text = serde_json::to_string_pretty(&entry).map_err(std::io::Error::from)?;
    std::fs::write(path.with_extension("json"), text)?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::classifier::{Zone, ZoneMarkers};

  fn left_result() -> Classification {
    Classification {
      zone: Zone::Left,
      markers: Some(ZoneMarkers {
        left: Marker {
          x: 10.0,
          y: 10.0,
          color: [0, 255, 0],
        },
        center: Marker {
          x: 30.0,
          y: 10.0,
          color: [255, 255, 0],
        },
      }),
    }
  }

  #[test]
  fn draws_ring_in_marker_color() {
    let image = RgbImage::new(40, 20);
    let annotated = Annotate::default().annotate(&image, &left_result());

    // 半径 2..=4 的圆环
    assert_eq!(*annotated.get_pixel(13, 10), Rgb([0, 255, 0]));
    assert_eq!(*annotated.get_pixel(33, 10), Rgb([255, 255, 0]));
    assert_eq!(*annotated.get_pixel(10, 10), Rgb([0, 0, 0]));
    assert_eq!(image, RgbImage::new(40, 20));
  }

  #[test]
  fn none_result_is_left_untouched() {
    let image = RgbImage::new(40, 20);
    let annotated = Annotate::default().annotate(&image, &Classification::none());
    assert_eq!(annotated, image);
  }

  #[test]
  fn markers_near_edges_are_clipped() {
    let mut result = left_result();
    if let Some(markers) = result.markers.as_mut() {
      markers.left.x = 0.0;
      markers.left.y = 0.0;
    }
    let annotated = Annotate::default()
      .with_radius(6)
      .with_thickness(1)
      .annotate(&RgbImage::new(40, 20), &result);
    assert_eq!(*annotated.get_pixel(6, 0), Rgb([0, 255, 0]));
  }

  #[test]
  fn record_writes_json_sidecar() {
    let dir = tempfile::tempdir().expect("创建临时目录失败");
    let path = dir.path().join("frame.jpg");
    Record.record(&left_result(), &path).expect("写入失败");

    let text = std::fs::read_to_string(dir.path().join("frame.json")).expect("读取失败");
    let value: serde_json::Value = serde_json::from_str(&text).expect("JSON 无效");
    assert_eq!(value["code"], 1);
    assert_eq!(value["zone"], "LEFT");
    assert_eq!(value["markers"]["center"]["color"][0], 255);
  }
}
