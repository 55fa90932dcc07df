//! 実行中リクエストの管理
//!
//! 操作の種類ごとに世代番号を持ち、最後に発行したチケットの
//! レスポンスだけを反映する。ファイル再選択でエポックが進み、
//! それ以前のチケットはすべて無効になる。

use crate::error::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub action: Action,
    epoch: u64,
    generation: u64,
}

#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    epoch: u64,
    generations: [u64; 4],
    pending: [bool; 4],
}

impl RequestTracker {
    pub fn issue(&mut self, action: Action) -> Ticket {
        let i = action.index();
        self.generations[i] += 1;
        self.pending[i] = true;
        Ticket {
            action,
            epoch: self.epoch,
            generation: self.generations[i],
        }
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.epoch == self.epoch && ticket.generation == self.generations[ticket.action.index()]
    }

    /// レスポンス到着時に呼ぶ。最新のチケットなら `true`
    pub fn settle(&mut self, ticket: &Ticket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.pending[ticket.action.index()] = false;
        true
    }

    pub fn invalidate_all(&mut self) {
        self.epoch += 1;
        self.pending = [false; 4];
    }

    pub fn is_pending(&self, action: Action) -> bool {
        self.pending[action.index()]
    }
}
