//! 対話式の分割位置入力・セグメント選択

use crate::error::Result;
use dialoguer::{Input, MultiSelect};
use splitcut_common::{format_time, SegmentLink};

/// 入力アクション
#[derive(Debug, PartialEq)]
pub enum MarkerAction {
    /// 分割位置（秒）
    Add(f64),
    /// 入力終了
    Done,
    /// 解釈できない入力
    Invalid(String),
}

/// 秒数（`75.4`）または `m:ss`（`1:15.4`）を解釈
pub fn parse_position(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    let seconds = match trimmed.split_once(':') {
        Some((mm, ss)) => {
            let minutes: u64 = mm.trim().parse().ok()?;
            let seconds: f64 = ss.trim().parse().ok()?;
            if !(0.0..60.0).contains(&seconds) {
                return None;
            }
            minutes as f64 * 60.0 + seconds
        }
        None => trimmed.parse().ok()?,
    };
    (seconds.is_finite() && seconds >= 0.0).then_some(seconds)
}

pub fn parse_marker_action(input: &str) -> MarkerAction {
    let trimmed = input.trim();
    match trimmed {
        "" | "q" | "Q" => MarkerAction::Done,
        _ => match parse_position(trimmed) {
            Some(seconds) => MarkerAction::Add(seconds),
            None => MarkerAction::Invalid(trimmed.to_string()),
        },
    }
}

/// 分割位置を1件ずつ入力（空Enterで終了）
pub fn prompt_split_positions() -> Result<Vec<f64>> {
    println!("分割位置を入力してください（秒 または m:ss、空Enterで終了）");
    let mut positions = Vec::new();

    loop {
        let input: String = Input::new()
            .with_prompt(format!("分割位置 #{}", positions.len() + 1))
            .allow_empty(true)
            .interact_text()?;

        match parse_marker_action(&input) {
            MarkerAction::Add(seconds) => {
                println!("  → {}", format_time(seconds));
                positions.push(seconds);
            }
            MarkerAction::Done => break,
            MarkerAction::Invalid(raw) => {
                println!("  → 解釈できません: {}", raw);
            }
        }
    }

    Ok(positions)
}

/// 連結に使うリンクを選ばせ、外すリンクの位置を降順で返す
pub fn prompt_segments_to_drop(links: &[SegmentLink]) -> Result<Vec<usize>> {
    let labels: Vec<&str> = links.iter().map(|l| l.href.as_str()).collect();
    let keep = MultiSelect::new()
        .with_prompt("連結するセグメント（Spaceで切替、Enterで確定）")
        .items(&labels)
        .defaults(&vec![true; labels.len()])
        .interact()?;
    Ok(indices_to_drop(links.len(), &keep))
}

/// 残す位置以外を降順で返す（前から削除しても位置がずれない順）
pub fn indices_to_drop(total: usize, keep: &[usize]) -> Vec<usize> {
    (0..total).rev().filter(|i| !keep.contains(i)).collect()
}
