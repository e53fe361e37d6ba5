/// The program break behind `_sbrk`.
///
/// The cursor starts out unset and is pinned to the heap base on the first
/// call to [`grow`](HeapCursor::grow). From then on it moves by exactly the
/// requested increments. Nothing is checked against the stack or the end of
/// RAM: running out of memory is not detected here.
pub struct HeapCursor {
    base: fn() -> usize,
    end: Option<usize>,
}

impl HeapCursor {
    /// `base` is resolved lazily, once, on the first `grow`.
    pub const fn new(base: fn() -> usize) -> Self {
        Self { base, end: None }
    }

    /// Move the break by `increment` bytes and return the previous break.
    pub fn grow(&mut self, increment: isize) -> usize {
        let base = self.base;
        let prev = *self.end.get_or_insert_with(base);
        self.end = Some(prev.wrapping_add_signed(increment));
        log::trace!("sbrk({increment}) -> {prev:#x}");
        prev
    }

    /// The current break, or `None` before the first `grow`.
    pub fn current(&self) -> Option<usize> {
        self.end
    }
}
