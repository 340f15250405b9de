// 该文件是 PropZone （道具分区） 项目的一部分。
// src/stage.rs - 管线各阶段
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

//! 每个阶段都是对图像或几何数据的纯变换，按
//! 裁剪 -> 颜色分割 -> 轮廓提取 -> 轮廓过滤 -> 区域判定 的顺序组合。

pub mod contour;
pub mod crop;
pub mod filter;
pub mod geometry;
pub mod segment;
pub mod zone;

pub use self::contour::{Contour, ContourMetrics, find_contours};
pub use self::crop::{CropRect, crop_region};
pub use self::filter::{ContourEnvelope, filter_contours};
pub use self::geometry::{Circle, min_enclosing_circle};
pub use self::segment::{HsvRange, segment_color};
pub use self::zone::{AreaBand, SideBands, SideMatch, ZoneBands, classify_zones};
