//! 画面表示用のモデル
//!
//! ステータスログ・分割マーカー・セグメントリンク一覧。
//! レンダラはこれを読むだけで、連結の入力もここから導出する。

use crate::time::{format_time, round_millis};

pub const OUTPUT_LINK_LABEL: &str = "Download output";

/// 追記専用のステータスログ
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusLog {
    lines: Vec<String>,
}

impl StatusLog {
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// 各行末に改行を付けた全文
    pub fn text(&self) -> String {
        self.lines.iter().map(|l| format!("{l}\n")).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SplitMarker {
    pub seconds: f64,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitMarkerList {
    markers: Vec<SplitMarker>,
}

impl SplitMarkerList {
    /// 再生位置からマーカーを追加（表示は丸め前の位置から作る）
    pub fn push(&mut self, position: f64) -> &SplitMarker {
        self.markers.push(SplitMarker {
            seconds: round_millis(position),
            label: format_time(position),
        });
        &self.markers[self.markers.len() - 1]
    }

    pub fn clear(&mut self) {
        self.markers.clear();
    }

    pub fn markers(&self) -> &[SplitMarker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// 分割で得られたセグメント
    Segment,
    /// 連結結果
    Output,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentLink {
    pub href: String,
    pub label: String,
    pub kind: LinkKind,
}

/// 表示中のセグメントリンク一覧
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentList {
    links: Vec<SegmentLink>,
}

impl SegmentList {
    /// 分割結果で一覧を置き換える
    pub fn replace_segments(&mut self, paths: Vec<String>) {
        self.links = paths
            .into_iter()
            .map(|path| SegmentLink {
                label: path.clone(),
                href: path,
                kind: LinkKind::Segment,
            })
            .collect();
    }

    pub fn push_output(&mut self, href: impl Into<String>) {
        self.links.push(SegmentLink {
            href: href.into(),
            label: OUTPUT_LINK_LABEL.to_string(),
            kind: LinkKind::Output,
        });
    }

    pub fn remove(&mut self, index: usize) -> Option<SegmentLink> {
        (index < self.links.len()).then(|| self.links.remove(index))
    }

    pub fn clear(&mut self) {
        self.links.clear();
    }

    pub fn links(&self) -> &[SegmentLink] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// 連結リクエスト用のパス一覧（先頭の `/` を1つ除去）
    ///
    /// 過去の連結結果のリンクも表示中であれば含まれる。
    pub fn concat_inputs(&self) -> Vec<String> {
        self.links
            .iter()
            .map(|link| link.href.strip_prefix('/').unwrap_or(&link.href).to_string())
            .collect()
    }
}
