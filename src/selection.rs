//! Single-slot "open chapter" state.
//!
//! Every open gets a fresh token. A fetch result is only applied if its token
//! still belongs to the open selection, so a slow response for a chapter the
//! user already closed or replaced is dropped.

use crate::chapter::SurahContent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The same id was already open and is now closed.
    Closed,
    /// A new selection is open; fetch its content and resolve with this token.
    Fetch(u64),
}

#[derive(Debug)]
struct Open {
    id: u32,
    token: u64,
    content: Option<SurahContent>,
}

#[derive(Debug, Default)]
pub struct Selection {
    open: Option<Open>,
    next_token: u64,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, id: u32) -> SelectOutcome {
        if self.current_id() == Some(id) {
            self.close();
            return SelectOutcome::Closed;
        }

        self.next_token += 1;
        let token = self.next_token;
        self.open = Some(Open { id, token, content: None });
        SelectOutcome::Fetch(token)
    }

    /// Store fetched content. Returns false when the token is stale.
    pub fn resolve(&mut self, token: u64, content: SurahContent) -> bool {
        match self.open.as_mut() {
            Some(open) if open.token == token => {
                open.content = Some(content);
                true
            }
            _ => false,
        }
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.open.as_ref().is_some_and(|open| open.content.is_none())
    }

    pub fn current_id(&self) -> Option<u32> {
        self.open.as_ref().map(|open| open.id)
    }

    pub fn content(&self) -> Option<&SurahContent> {
        self.open.as_ref().and_then(|open| open.content.as_ref())
    }
}
