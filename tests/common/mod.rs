#![allow(dead_code)]

pub mod mock_http_client;
pub mod mock_server;

use donation_alerts::{AuthConsole, BrowserView};
use std::sync::Mutex;

/// Auth console that records every view it was asked to open and returns its
/// sequence number as the handle.
pub struct RecordingConsole {
    opened: Mutex<Vec<BrowserView>>,
}

impl RecordingConsole {
    pub fn new() -> Self {
        Self {
            opened: Mutex::new(Vec::new()),
        }
    }

    pub fn opened(&self) -> Vec<BrowserView> {
        self.opened.lock().unwrap().clone()
    }
}

impl AuthConsole for RecordingConsole {
    type Handle = usize;

    fn open(&self, view: BrowserView) -> usize {
        let mut opened = self.opened.lock().unwrap();
        opened.push(view);
        opened.len()
    }
}
