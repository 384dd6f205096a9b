// File: src/runtime/loop_control.rs
//
// Control flow signaling for loop constructs.
//
// The runtime uses a stack of per-loop signal frames to manage break and
// continue statements within nested loops. Interpreted loop bodies set a
// signal on the innermost frame; the loop drivers consume the signal to
// decide whether to run the body, skip an iteration, or stop the loop,
// without using exceptions.

/// Default ceiling on active loop nesting
pub const DEFAULT_MAX_LOOP_DEPTH: usize = 1024;

/// Control flow signal for a single loop frame
///
/// Checked by the loop drivers before and after each body invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Normal execution, run the next iteration
    Normal,
    /// Break statement encountered, exit the innermost loop
    Break,
    /// Continue statement encountered, skip to the next loop iteration
    Continue,
}

/// Stack of active loop frames, one per nesting level
///
/// Signal queries and mutations always act on the innermost (top) frame.
/// Every operation degrades to a silent no-op at the boundaries: signaling
/// with no active loop does nothing, and entering past `max_depth` drops
/// the frame rather than failing. The cap is a soft limit: once it is hit,
/// exits keep decrementing past the frames actually created. Embedders
/// that nest loops past the default limit should raise it with
/// [`LoopStack::with_max_depth`].
#[derive(Debug, Clone)]
pub struct LoopStack {
    frames: Vec<Signal>,
    max_depth: usize,
}

impl LoopStack {
    /// Create a loop stack with the default depth limit
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_LOOP_DEPTH)
    }

    /// Create a loop stack with an explicit depth limit
    pub fn with_max_depth(max_depth: usize) -> Self {
        LoopStack { frames: Vec::new(), max_depth }
    }

    /// Number of currently active loop frames
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Push a new frame for an entered loop; dropped silently at max depth
    pub fn enter(&mut self) {
        if self.frames.len() < self.max_depth {
            self.frames.push(Signal::Normal);
        }
    }

    /// Pop the innermost frame; no-op with no active loop
    pub fn exit(&mut self) {
        self.frames.pop();
    }

    /// Mark the innermost loop as broken
    pub fn signal_break(&mut self) {
        if let Some(top) = self.frames.last_mut() {
            *top = Signal::Break;
        }
    }

    /// Mark the innermost loop as continued
    pub fn signal_continue(&mut self) {
        if let Some(top) = self.frames.last_mut() {
            *top = Signal::Continue;
        }
    }

    /// Whether the innermost loop should stop; false with no active loop
    pub fn should_break(&self) -> bool {
        self.frames.last() == Some(&Signal::Break)
    }

    /// Whether the innermost loop should skip ahead; false with no active loop
    pub fn should_continue(&self) -> bool {
        self.frames.last() == Some(&Signal::Continue)
    }

    /// Reset the innermost frame's signal to normal
    pub fn clear_signal(&mut self) {
        if let Some(top) = self.frames.last_mut() {
            *top = Signal::Normal;
        }
    }

    // A continue raised while the body ran has already skipped the rest of
    // that body; consume it here so it cannot leak into the next iteration.
    fn consume_continue(&mut self) {
        if self.should_continue() {
            self.clear_signal();
        }
    }

    /// Counted range loop: iterates from `start` toward `end` by `step`
    ///
    /// A zero step makes the whole driver a no-op without entering a frame.
    /// The body receives the stack so it can signal break or continue.
    pub fn for_range(
        &mut self,
        start: i64,
        end: i64,
        step: i64,
        mut body: impl FnMut(&mut LoopStack, i64),
    ) {
        if step == 0 {
            return;
        }
        self.enter();
        let mut i = start;
        while if step > 0 { i < end } else { i > end } {
            if self.should_break() {
                break;
            }
            if self.should_continue() {
                self.clear_signal();
                i += step;
                continue;
            }
            body(self, i);
            self.consume_continue();
            i += step;
        }
        self.exit();
    }

    /// While loop: runs `body` as long as `cond` holds
    pub fn while_loop(
        &mut self,
        mut cond: impl FnMut(&mut LoopStack) -> bool,
        mut body: impl FnMut(&mut LoopStack),
    ) {
        self.enter();
        while cond(self) {
            if self.should_break() {
                break;
            }
            if self.should_continue() {
                self.clear_signal();
                continue;
            }
            body(self);
            self.consume_continue();
        }
        self.exit();
    }

    /// Do-while loop: the body is eligible to run before the first
    /// predicate check; a consumed continue re-evaluates the predicate
    /// before the next pass
    pub fn do_while(
        &mut self,
        mut cond: impl FnMut(&mut LoopStack) -> bool,
        mut body: impl FnMut(&mut LoopStack),
    ) {
        self.enter();
        loop {
            if self.should_break() {
                break;
            }
            if self.should_continue() {
                self.clear_signal();
                if !cond(self) {
                    break;
                }
                continue;
            }
            body(self);
            self.consume_continue();
            if !cond(self) {
                break;
            }
        }
        self.exit();
    }

    /// Foreach loop over a slice of any element type
    pub fn for_each<T>(&mut self, items: &[T], mut body: impl FnMut(&mut LoopStack, &T)) {
        self.enter();
        for item in items {
            if self.should_break() {
                break;
            }
            if self.should_continue() {
                self.clear_signal();
                continue;
            }
            body(self, item);
            self.consume_continue();
        }
        self.exit();
    }

    /// Nested two-dimensional loop over `rows` x `cols`
    ///
    /// The row loop and each column pass get their own frames. A break on
    /// the outer frame stops the whole construct; inner signals are scoped
    /// to the column frame and never affect row iteration. An outer
    /// continue is consumed after the inner frame exits and advances to
    /// the next row.
    pub fn nested_2d(
        &mut self,
        rows: i64,
        cols: i64,
        mut body: impl FnMut(&mut LoopStack, i64, i64),
    ) {
        self.enter();
        for i in 0..rows {
            if self.should_break() {
                break;
            }
            self.enter();
            for j in 0..cols {
                if self.should_break() {
                    break;
                }
                if self.should_continue() {
                    self.clear_signal();
                    continue;
                }
                body(self, i, j);
                self.consume_continue();
            }
            self.exit();
            if self.should_continue() {
                self.clear_signal();
                continue;
            }
        }
        self.exit();
    }

    /// Infinite loop: terminates only when the body signals break
    pub fn infinite(&mut self, mut body: impl FnMut(&mut LoopStack)) {
        self.enter();
        loop {
            if self.should_break() {
                break;
            }
            if self.should_continue() {
                self.clear_signal();
                continue;
            }
            body(self);
            self.consume_continue();
        }
        self.exit();
    }

    /// Counted repetition: runs `body` with indices `0..times`
    pub fn repeat_n(&mut self, times: usize, mut body: impl FnMut(&mut LoopStack, usize)) {
        self.enter();
        for i in 0..times {
            if self.should_break() {
                break;
            }
            if self.should_continue() {
                self.clear_signal();
                continue;
            }
            body(self, i);
            self.consume_continue();
        }
        self.exit();
    }
}

impl Default for LoopStack {
    fn default() -> Self {
        Self::new()
    }
}

/// Counters for loop activity, incremented by the embedder
///
/// The drivers never touch these; an interpreter that wants the numbers
/// records iterations, breaks, and continues from its own loop bodies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub total_iterations: u64,
    pub breaks_hit: u64,
    pub continues_hit: u64,
}

impl LoopStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_iteration(&mut self) {
        self.total_iterations += 1;
    }

    pub fn record_break(&mut self) {
        self.breaks_hit += 1;
    }

    pub fn record_continue(&mut self) {
        self.continues_hit += 1;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Render the fixed human-readable report
    pub fn report(&self) -> String {
        format!(
            "=== Cyon Loop Statistics ===\n\
             Total iterations: {}\n\
             Break statements: {}\n\
             Continue statements: {}",
            self.total_iterations, self.breaks_hit, self.continues_hit
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_exit_tracks_depth() {
        let mut stack = LoopStack::new();
        assert_eq!(stack.depth(), 0);
        stack.enter();
        stack.enter();
        assert_eq!(stack.depth(), 2);
        stack.exit();
        assert_eq!(stack.depth(), 1);
        stack.exit();
        stack.exit();
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_enter_past_max_depth_is_dropped() {
        let mut stack = LoopStack::with_max_depth(2);
        for _ in 0..5 {
            stack.enter();
        }
        assert_eq!(stack.depth(), 2);
    }

    #[test]
    fn test_signals_ignored_with_no_active_loop() {
        let mut stack = LoopStack::new();
        stack.signal_break();
        stack.signal_continue();
        stack.clear_signal();
        assert!(!stack.should_break());
        assert!(!stack.should_continue());
    }

    #[test]
    fn test_break_signal_set_and_clear() {
        let mut stack = LoopStack::new();
        stack.enter();
        stack.signal_break();
        assert!(stack.should_break());
        stack.clear_signal();
        assert!(!stack.should_break());
        stack.exit();
    }

    #[test]
    fn test_signal_targets_innermost_frame_only() {
        let mut stack = LoopStack::new();
        stack.enter();
        stack.enter();
        stack.signal_break();
        assert!(stack.should_break());
        stack.exit();
        assert!(!stack.should_break());
        stack.exit();
    }

    #[test]
    fn test_zero_step_range_never_enters_a_frame() {
        let mut stack = LoopStack::new();
        let mut ran = false;
        stack.for_range(0, 10, 0, |_, _| ran = true);
        assert!(!ran);
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_for_range_descending_step() {
        let mut stack = LoopStack::new();
        let mut visited = Vec::new();
        stack.for_range(5, 0, -2, |_, i| visited.push(i));
        assert_eq!(visited, vec![5, 3, 1]);
    }

    #[test]
    fn test_do_while_body_runs_before_first_check() {
        let mut stack = LoopStack::new();
        let mut runs = 0;
        stack.do_while(|_| false, |_| runs += 1);
        assert_eq!(runs, 1);
    }

    #[test]
    fn test_while_loop_condition_gates_body() {
        let mut stack = LoopStack::new();
        let remaining = std::cell::Cell::new(3);
        let mut runs = 0;
        stack.while_loop(
            |_| remaining.get() > 0,
            |_| {
                remaining.set(remaining.get() - 1);
                runs += 1;
            },
        );
        assert_eq!(runs, 3);
    }

    #[test]
    fn test_infinite_loop_stops_on_break() {
        let mut stack = LoopStack::new();
        let mut count = 0;
        stack.infinite(|loops| {
            count += 1;
            if count == 4 {
                loops.signal_break();
            }
        });
        assert_eq!(count, 4);
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_stats_report_format() {
        let mut stats = LoopStats::new();
        stats.record_iteration();
        stats.record_iteration();
        stats.record_break();
        assert_eq!(
            stats.report(),
            "=== Cyon Loop Statistics ===\n\
             Total iterations: 2\n\
             Break statements: 1\n\
             Continue statements: 0"
        );
        stats.reset();
        assert_eq!(stats, LoopStats::new());
    }
}
