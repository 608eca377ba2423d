// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// Pretty printers for reporting results.
use std::{borrow::Cow, sync::Mutex};

const VERTICAL: char = '│';
const UP_AND_RIGHT: char = '└';
const VERTICAL_AND_RIGHT: char = '├';

lazy_static::lazy_static! {
    static ref WARNING_PRINTER: Mutex<WarningPrinter> = Mutex::new(WarningPrinter::default());
}

/// The symbol leading a line of a tree-like report.
fn tree_symbol(i_line: usize, num_lines: usize, i_block: usize, num_blocks: usize) -> char {
    match (i_line, i_line + 1 == num_lines, i_block + 1 == num_blocks) {
        (0, false, _) => VERTICAL_AND_RIGHT,
        (0, _, false) => VERTICAL_AND_RIGHT,
        (0, true, true) => UP_AND_RIGHT,
        _ => VERTICAL,
    }
}

pub(crate) struct InfoPrinter {
    title: Cow<'static, str>,
    blocks: Vec<Vec<Cow<'static, str>>>,
}

impl InfoPrinter {
    pub(crate) fn new(title: Cow<'static, str>) -> Self {
        Self {
            title,
            blocks: vec![],
        }
    }

    pub(crate) fn push_line(&mut self, line: Cow<'static, str>) {
        self.blocks.push(vec![line]);
    }

    pub(crate) fn push_block(&mut self, block: Vec<Cow<'static, str>>) {
        self.blocks.push(block);
    }

    pub(crate) fn display(self) {
        log::info!("{}", console::style(self.title).bold());
        let num_blocks = self.blocks.len();
        for (i_block, block) in self.blocks.into_iter().enumerate() {
            let num_lines = block.len();
            for (i_line, line) in block.into_iter().enumerate() {
                let symbol = tree_symbol(i_line, num_lines, i_block, num_blocks);
                log::info!("{symbol} {line}");
            }
        }
        log::info!("");
    }
}

#[derive(Default)]
struct WarningPrinter {
    blocks: Vec<Vec<Cow<'static, str>>>,
}

impl WarningPrinter {
    fn push_line(&mut self, line: Cow<'static, str>) {
        self.blocks.push(vec![line]);
    }

    fn push_block(&mut self, block: Vec<Cow<'static, str>>) {
        self.blocks.push(block);
    }

    fn display(&mut self) {
        log::debug!("Displaying warnings");
        if self.blocks.is_empty() {
            return;
        }

        log::warn!("{}", console::style("Warnings").bold());
        let num_blocks = self.blocks.len();
        for (i_block, block) in self.blocks.iter().enumerate() {
            let num_lines = block.len();
            for (i_line, line) in block.iter().enumerate() {
                let symbol = tree_symbol(i_line, num_lines, i_block, num_blocks);
                log::warn!("{symbol} {line}");
            }
        }
        log::warn!("");
        self.blocks.clear();
    }
}

/// Things that can be queued up and shown to the user as warnings.
pub(crate) trait Warn {
    fn warn(self);
}

// A poisoned lock only means another thread panicked while queueing; the
// queued lines are still fine to print.
fn printer() -> std::sync::MutexGuard<'static, WarningPrinter> {
    WARNING_PRINTER
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Warn for String {
    fn warn(self) {
        printer().push_line(self.into());
    }
}

impl Warn for Vec<Cow<'static, str>> {
    fn warn(self) {
        printer().push_block(self);
    }
}

/// Print out any warnings that have been collected.
pub(crate) fn display_warnings() {
    printer().display();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_symbols() {
        // A lone line closes the tree.
        assert_eq!(tree_symbol(0, 1, 0, 1), UP_AND_RIGHT);
        // The first line of a block that isn't the last.
        assert_eq!(tree_symbol(0, 1, 0, 2), VERTICAL_AND_RIGHT);
        // The first line of a multi-line block.
        assert_eq!(tree_symbol(0, 3, 1, 2), VERTICAL_AND_RIGHT);
        // Continuation lines.
        assert_eq!(tree_symbol(1, 3, 1, 2), VERTICAL);
        assert_eq!(tree_symbol(2, 3, 1, 2), VERTICAL);
    }

    #[test]
    fn test_warnings_are_cleared_after_display() {
        let mut printer = WarningPrinter::default();
        printer.push_line("one".into());
        printer.push_block(vec!["two".into(), "  three".into()]);
        assert_eq!(printer.blocks.len(), 2);
        assert_eq!(printer.blocks[1].len(), 2);

        printer.display();
        assert!(printer.blocks.is_empty());
    }
}
