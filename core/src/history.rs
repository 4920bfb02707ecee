use std::collections::VecDeque;

/// Bounded record of the byte widths of the most recently read code points.
///
/// Once `capacity` widths are held, pushing drops the oldest one. Widths are
/// at most four bytes.
#[derive(Debug, Clone)]
pub(crate) struct WidthHistory {
    widths: VecDeque<u8>,
    capacity: usize,
}

impl WidthHistory {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            widths: VecDeque::with_capacity(capacity.min(64)),
            capacity,
        }
    }

    pub(crate) fn push(&mut self, width: usize) {
        if self.capacity == 0 {
            return;
        }
        if self.widths.len() == self.capacity {
            self.widths.pop_front();
        }
        // Code point widths never exceed four bytes.
        self.widths.push_back(width as u8);
    }

    pub(crate) fn pop(&mut self) -> Option<usize> {
        self.widths.pop_back().map(usize::from)
    }

    /// Total bytes covered by the remembered widths.
    pub(crate) fn retained_bytes(&self) -> usize {
        self.widths.iter().map(|&w| usize::from(w)).sum()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.widths.len()
    }
}
