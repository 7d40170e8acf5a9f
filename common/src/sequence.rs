//! リクエストの世代管理
//!
//! 種類ごとに連番を振り、最新でない応答は捨てる。

/// リクエストの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Projects,
    ProjectConfig,
    Load,
    Save,
    AutoCaption,
}

impl RequestKind {
    const ALL: [RequestKind; 5] = [
        RequestKind::Projects,
        RequestKind::ProjectConfig,
        RequestKind::Load,
        RequestKind::Save,
        RequestKind::AutoCaption,
    ];

    fn slot(self) -> usize {
        match self {
            RequestKind::Projects => 0,
            RequestKind::ProjectConfig => 1,
            RequestKind::Load => 2,
            RequestKind::Save => 3,
            RequestKind::AutoCaption => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::Projects => "projects",
            RequestKind::ProjectConfig => "project-config",
            RequestKind::Load => "load",
            RequestKind::Save => "save",
            RequestKind::AutoCaption => "autocaption",
        }
    }
}

/// 発行済みリクエストの控え
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub kind: RequestKind,
    pub seq: u64,
    /// 発行時点のデータセット世代
    pub epoch: u64,
}

#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    next_seq: u64,
    latest: [Option<u64>; RequestKind::ALL.len()],
    epoch: u64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self, kind: RequestKind) -> Ticket {
        self.next_seq += 1;
        self.latest[kind.slot()] = Some(self.next_seq);
        Ticket {
            kind,
            seq: self.next_seq,
            epoch: self.epoch,
        }
    }

    /// 同じ種類の中で最新かつ同じデータセット世代の控えか
    ///
    /// プロジェクト関連はデータセット世代に依存しない。
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        let latest = self.latest[ticket.kind.slot()] == Some(ticket.seq);
        match ticket.kind {
            RequestKind::Save | RequestKind::AutoCaption => latest && ticket.epoch == self.epoch,
            _ => latest,
        }
    }

    /// 応答処理が済んだ控えを閉じる（同じ控えの二重適用を防ぐ）
    pub fn complete(&mut self, ticket: &Ticket) {
        if self.latest[ticket.kind.slot()] == Some(ticket.seq) {
            self.latest[ticket.kind.slot()] = None;
        }
    }

    pub fn in_flight(&self, kind: RequestKind) -> bool {
        self.latest[kind.slot()].is_some()
    }

    /// データセットを読み込み直したら世代を進める
    pub fn advance_epoch(&mut self) {
        self.epoch += 1;
    }
}
