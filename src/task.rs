// 该文件是 PropZone （道具分区） 项目的一部分。
// src/task.rs - 任务调度
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

use std::sync::mpsc::{self, Receiver};
use std::{thread, time::Duration};

use tracing::{info, warn};

use crate::{
  classifier::{Classification, Classifier},
  frame::Frame,
  output::Render,
};

/// 输入、分类器与输出的组合方式
///
/// 返回任务结束时的分类结果。
pub trait Task<I, C, O>: Sized {
  type Error;
  fn run_task(self, input: I, classifier: C, output: O) -> Result<Classification, Self::Error>;
}

/// 安装 Ctrl-C 处理器，收到信号后通过通道通知任务循环
///
/// 30 秒内任务仍未退出则强制结束进程。
pub fn install_interrupt() -> anyhow::Result<Receiver<()>> {
  let (tx, rx) = mpsc::channel();

  ctrlc::set_handler(move || {
    info!("收到中断信号，准备退出...");
    let _ = tx.send(());
    thread::spawn(|| {
      thread::sleep(Duration::from_secs(30));
      warn!("强制退出程序");
      std::process::exit(1);
    });
  })?;

  Ok(rx)
}

pub struct OneShotTask;

impl<RE, I, C, O> Task<I, C, O> for OneShotTask
where
  RE: std::error::Error + Sync + Send + 'static,
  I: Iterator<Item = Frame>,
  C: Classifier,
  O: Render<Frame, Classification, Error = RE>,
{
  type Error = anyhow::Error;

  fn run_task(self, mut input: I, classifier: C, output: O) -> Result<Classification, Self::Error> {
    info!("开始任务...");
    let frame = input.next().ok_or_else(|| anyhow::anyhow!("没有输入帧"))?;
    info!("输入帧获取成功，开始识别...");
    let now = std::time::Instant::now();
    let result = classifier.classify(&frame.image);
    let elapsed = now.elapsed();
    info!("识别完成: {}，耗时: {:.2?}", result.zone, elapsed);
    output.render_result(&frame, &result)?;
    info!("渲染完成，耗时: {:.2?}", now.elapsed());

    Ok(result)
  }
}

/// 逐帧识别，直到输入耗尽、达到帧数上限、收到中断，
/// 或在 `until_found` 时得到第一个非 NONE 结果。
#[derive(Default, Debug)]
pub struct ContinuousTask {
  frame_number: Option<usize>,
  until_found: bool,
  interrupt: Option<Receiver<()>>,
}

impl ContinuousTask {
  pub fn with_frame_number(mut self, frame_number: Option<usize>) -> Self {
    self.frame_number = frame_number;
    self
  }

  pub fn until_found(mut self, until_found: bool) -> Self {
    self.until_found = until_found;
    self
  }

  pub fn with_interrupt(mut self, interrupt: Receiver<()>) -> Self {
    self.interrupt = Some(interrupt);
    self
  }

  pub fn handle_interrupt(self) -> anyhow::Result<Self> {
    Ok(self.with_interrupt(install_interrupt()?))
  }

  fn interrupted(&self) -> bool {
    self
      .interrupt
      .as_ref()
      .map(|rx| rx.try_recv().is_ok())
      .unwrap_or(false)
  }
}

impl<RE, I, C, O> Task<I, C, O> for ContinuousTask
where
  RE: std::error::Error + Sync + Send + 'static,
  I: Iterator<Item = Frame>,
  C: Classifier,
  O: Render<Frame, Classification, Error = RE>,
{
  type Error = anyhow::Error;

  fn run_task(self, input: I, classifier: C, output: O) -> Result<Classification, Self::Error> {
    info!("开始任务...");

    let mut last = Classification::none();
    let mut frame_count = 0usize;
    let mut now = std::time::Instant::now();
    for frame in input {
      frame_count = frame_count.saturating_add(1);
      info!("处理第 {} 帧图像", frame_count);
      last = classifier.classify(&frame.image);
      let elapsed_a = now.elapsed();
      output.render_result(&frame, &last)?;
      let elapsed_b = now.elapsed();
      now = std::time::Instant::now();
      info!(
        "识别结果 {}，耗时: {:.2?} / {:.2?}",
        last.zone, elapsed_a, elapsed_b
      );
      if self.until_found && !last.is_none() {
        info!("识别到道具位置 {}，退出任务循环", last.zone);
        break;
      }
      if self.frame_number.map(|n| frame_count >= n).unwrap_or(false) {
        info!("达到指定帧数 {}, 退出任务循环", frame_count);
        break;
      }
      if self.interrupted() {
        warn!("中断信号接收，退出任务循环");
        break;
      }
    }

    info!("任务完成，共处理 {} 帧", frame_count);
    Ok(last)
  }
}

#[cfg(test)]
mod tests {
  use std::cell::{Cell, RefCell};
  use std::convert::Infallible;

  use image::RgbImage;

  use super::*;
  use crate::classifier::Zone;

  /// 以帧左上角像素的红色分量作为区域编码
  struct PixelCode;

  impl Classifier for PixelCode {
    fn classify(&self, image: &RgbImage) -> Classification {
      Classification {
        zone: Zone::from_code(image.get_pixel(0, 0)[0]).unwrap_or_default(),
        markers: None,
      }
    }
  }

  #[derive(Default)]
  struct Collect {
    zones: RefCell<Vec<Zone>>,
  }

  impl Render<Frame, Classification> for &Collect {
    type Error = Infallible;

    fn render_result(&self, _frame: &Frame, result: &Classification) -> Result<(), Self::Error> {
      self.zones.borrow_mut().push(result.zone);
      Ok(())
    }
  }

  fn frames(codes: &[u8]) -> impl Iterator<Item = Frame> + '_ {
    codes.iter().enumerate().map(|(index, &code)| {
      Frame::new(
        RgbImage::from_pixel(2, 2, image::Rgb([code, 0, 0])),
        index as u64,
        0,
      )
    })
  }

  #[test]
  fn one_shot_uses_first_frame_only() {
    let output = Collect::default();
    let result = OneShotTask
      .run_task(frames(&[2, 1]), PixelCode, &output)
      .expect("任务失败");
    assert_eq!(result.zone, Zone::Center);
    assert_eq!(*output.zones.borrow(), vec![Zone::Center]);
  }

  #[test]
  fn one_shot_without_frames_fails() {
    let output = Collect::default();
    assert!(OneShotTask.run_task(frames(&[]), PixelCode, &output).is_err());
  }

  #[test]
  fn continuous_stops_at_first_found() {
    let output = Collect::default();
    let result = ContinuousTask::default()
      .until_found(true)
      .run_task(frames(&[0, 0, 3, 1]), PixelCode, &output)
      .expect("任务失败");
    assert_eq!(result.zone, Zone::Right);
    assert_eq!(output.zones.borrow().len(), 3);
  }

  #[test]
  fn continuous_honours_frame_limit() {
    let output = Collect::default();
    let result = ContinuousTask::default()
      .with_frame_number(Some(2))
      .run_task(frames(&[1, 2, 3]), PixelCode, &output)
      .expect("任务失败");
    assert_eq!(result.zone, Zone::Center);
    assert_eq!(*output.zones.borrow(), vec![Zone::Left, Zone::Center]);
  }

  #[test]
  fn continuous_runs_until_input_ends() {
    let output = Collect::default();
    let result = ContinuousTask::default()
      .run_task(frames(&[1, 0]), PixelCode, &output)
      .expect("任务失败");
    assert!(result.is_none());
    assert_eq!(output.zones.borrow().len(), 2);
  }

  #[test]
  fn continuous_stops_on_interrupt() {
    let (tx, rx) = mpsc::channel();
    tx.send(()).expect("发送失败");
    let output = Collect::default();
    let seen = Cell::new(0);
    let counted = frames(&[0, 0, 0]).inspect(|_| seen.set(seen.get() + 1));
    ContinuousTask::default()
      .with_interrupt(rx)
      .run_task(counted, PixelCode, &output)
      .expect("任务失败");
    assert_eq!(seen.get(), 1);
  }
}
