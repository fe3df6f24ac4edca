//! Evaluation tracking.
//!
//! The tracker records which derivation is currently running so that
//! dependency collection can happen automatically: when an observable is
//! read, it asks the tracker for the current reader and registers the edge.
//!
//! # Implementation
//!
//! We use a thread-local stack of frames, one frame per derivation run.
//! Entering a frame returns an RAII guard; the frame is popped when the guard
//! drops, so the stack stays consistent even when a derivation panics.
//!
//! Nested frames occur when one computed cache reads another. The same stack
//! doubles as the cycle guard: a reader that is already on the stack cannot
//! legally be read again.

use std::cell::RefCell;

use super::reader::ReaderId;

thread_local! {
    static FRAME_STACK: RefCell<Vec<Frame>> = const { RefCell::new(Vec::new()) };
}

/// One in-flight derivation run.
#[derive(Debug)]
struct Frame {
    /// The reader this frame evaluates on behalf of.
    reader: ReaderId,
    /// Source IDs read during this run.
    reads: Vec<u64>,
}

/// Guard for one derivation run; pops the frame when dropped.
pub struct Tracker {
    reader: ReaderId,
}

impl Tracker {
    /// Push a new tracking frame for the given reader.
    ///
    /// While the frame is live, every tracked read records a dependency for
    /// this reader. The frame is popped when the returned guard drops.
    pub fn enter(reader: ReaderId) -> Self {
        FRAME_STACK.with(|stack| {
            stack.borrow_mut().push(Frame {
                reader,
                reads: Vec::new(),
            });
        });

        Self { reader }
    }

    /// Check whether any derivation is currently running on this thread.
    pub fn is_active() -> bool {
        FRAME_STACK.with(|stack| !stack.borrow().is_empty())
    }

    /// The reader of the innermost live frame, if any.
    pub fn current_reader() -> Option<ReaderId> {
        FRAME_STACK.with(|stack| stack.borrow().last().map(|frame| frame.reader))
    }

    /// Check whether the given reader has a frame anywhere on the stack.
    ///
    /// Used as the recursion guard: a reader on the stack reading itself
    /// (directly or through intermediaries) is a cyclic derivation.
    pub fn on_stack(reader: ReaderId) -> bool {
        FRAME_STACK.with(|stack| stack.borrow().iter().any(|frame| frame.reader == reader))
    }

    /// Record that the innermost frame read the given source.
    pub fn record_read(source_id: u64) {
        FRAME_STACK.with(|stack| {
            if let Some(frame) = stack.borrow_mut().last_mut() {
                frame.reads.push(source_id);
            }
        });
    }

    /// The source IDs read so far by the innermost frame.
    pub fn collected_reads() -> Vec<u64> {
        FRAME_STACK.with(|stack| {
            stack
                .borrow()
                .last()
                .map(|frame| frame.reads.clone())
                .unwrap_or_default()
        })
    }
}

impl Drop for Tracker {
    fn drop(&mut self) {
        FRAME_STACK.with(|stack| {
            let popped = stack.borrow_mut().pop();

            // Catch mismatched enter/drop pairs early in debug builds.
            if let Some(frame) = popped {
                debug_assert_eq!(
                    frame.reader, self.reader,
                    "tracking frame mismatch: expected {:?}, got {:?}",
                    self.reader, frame.reader
                );
            }
        });
    }
}
