// 该文件是 PropZone （道具分区） 项目的一部分。
// src/bin/prop_watch.rs - 连续帧道具位置识别
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

use anyhow::Result;
use clap::Parser;
use tracing::info;
use url::Url;

use prop_zone::{
  FromUrl,
  classifier::{PropPipelineBuilder, TracingObserver},
  input::InputWrapper,
  output::OutputWrapper,
  task::{ContinuousTask, Task},
};

/// PropZone 连续识别参数
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// 管线配置，preset://red、preset://blue 或 toml:///path
  #[arg(long, value_name = "CONFIG", default_value = "preset://red")]
  pub config: Url,
  /// 输入来源
  #[arg(long, value_name = "SOURCE")]
  pub input: Url,
  /// 输出路径
  #[arg(long, value_name = "OUTPUT", default_value = "null:")]
  pub output: Url,

  #[arg(long, value_name = "FRAME_NUMBER")]
  pub frame_number: Option<usize>,
  /// 识别到道具后继续处理后续帧
  #[arg(long)]
  pub keep_going: bool,
}

fn main() -> Result<()> {
  tracing_subscriber::fmt::init();

  let args = Args::parse();

  info!("管线配置: {}", args.config);
  info!("输入来源: {}", args.input);
  info!("输出路径: {}", args.output);

  let pipeline = PropPipelineBuilder::from_url(&args.config)?
    .observer(TracingObserver)
    .build()?;
  let input = InputWrapper::from_url(&args.input)?;
  let output = OutputWrapper::from_url(&args.output)?;

  let result = ContinuousTask::default()
    .with_frame_number(args.frame_number)
    .until_found(!args.keep_going)
    .handle_interrupt()?
    .run_task(input, &pipeline, output)?;
  println!("{}", result.code());

  Ok(())
}
