use chapterize_core::WindowSpec;

use crate::error::EngineError;

/// Sizing for a segmentation run.
#[derive(Clone, Debug)]
pub struct SegmenterConfig {
    /// Messages per analysis window.
    pub window_size: usize,
    /// Messages shared between adjacent windows. Must be smaller than
    /// `window_size`.
    pub overlap: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            window_size: 80,
            overlap: 10,
        }
    }
}

impl SegmenterConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.window_size <= self.overlap {
            return Err(EngineError::Configuration(format!(
                "window_size ({}) must be greater than overlap ({})",
                self.window_size, self.overlap
            )));
        }
        Ok(())
    }
}

/// Decide the windowing strategy for a conversation of `total` messages.
///
/// Short conversations (under twice the window size) go to the detector as
/// one window, even when they exceed the window size itself; splitting them
/// would spend a second query on mostly-overlapping context. Longer ones
/// are covered by windows of `window_size` advancing by
/// `window_size - overlap`, the last clipped to the true end.
pub fn plan_windows(total: usize, config: &SegmenterConfig) -> Vec<WindowSpec> {
    if total < config.window_size * 2 {
        return vec![WindowSpec {
            offset: 0,
            len: total,
        }];
    }

    let step = config.window_size - config.overlap;
    let mut windows = Vec::new();
    let mut pos = 0;
    loop {
        let end = usize::min(pos + config.window_size, total);
        windows.push(WindowSpec {
            offset: pos,
            len: end - pos,
        });
        if end >= total {
            break;
        }
        pos += step;
    }
    windows
}
