//! Fixed capacity byte queues used to hand received frames from
//! interrupt context to foreground code.

use core::cell::RefCell;
use critical_section::Mutex;

/// A circular byte queue backed by an inline array of `N` bytes.
///
/// Writes are all-or-nothing while reads may be partial. One slot is always
/// kept free, so at most `N - 1` bytes are ever buffered.
#[derive(Debug, Clone)]
pub struct RingBuffer<const N: usize> {
    buf: [u8; N],
    head: usize,
    tail: usize,
    count: usize,
}

impl<const N: usize> Default for RingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RingBuffer<N> {
    /// Create an empty buffer.
    pub const fn new() -> Self {
        Self {
            buf: [0u8; N],
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    /// The size of the backing store.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of bytes currently buffered.
    pub const fn len(&self) -> usize {
        self.count
    }

    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Reset head, tail and count to their initial values.
    pub fn init(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.count = 0;
    }

    /// Append all of `data` or nothing.
    ///
    /// Returns the number of bytes accepted, which is either `data.len()` or 0.
    /// A write is rejected when `len() + data.len()` would reach the capacity.
    pub fn put(&mut self, data: &[u8]) -> usize {
        if N == 0 || self.count + data.len() >= N {
            return 0;
        }
        for byte in data {
            self.buf[self.tail] = *byte;
            self.tail = (self.tail + 1) % N;
        }
        self.count += data.len();
        data.len()
    }

    /// Pop up to `dest.len()` bytes into `dest`.
    ///
    /// Returns the number of bytes copied.
    pub fn get(&mut self, dest: &mut [u8]) -> usize {
        let n = self.peek(dest);
        self.head = (self.head + n) % N.max(1);
        self.count -= n;
        n
    }

    /// Copy up to `dest.len()` bytes into `dest` without consuming them.
    pub fn peek(&self, dest: &mut [u8]) -> usize {
        let n = dest.len().min(self.count);
        let mut index = self.head;
        for byte in dest[..n].iter_mut() {
            *byte = self.buf[index];
            index = (index + 1) % N;
        }
        n
    }

    /// Discard all buffered bytes.
    pub fn flush(&mut self) {
        self.init();
    }
}

/// A [`RingBuffer`] of length-prefixed frames, shareable between an
/// interrupt handler (producer) and foreground code (consumer).
///
/// Every access runs inside a [`critical_section`], so the head, tail and count
/// of the underlying buffer are never observed mid-update.
///
/// Each stored frame is laid out as `[len, body @ len bytes]`.
pub struct FrameQueue<const N: usize> {
    inner: Mutex<RefCell<FrameQueueInner<N>>>,
}

struct FrameQueueInner<const N: usize> {
    ring: RingBuffer<N>,
    frames: usize,
}

impl<const N: usize> Default for FrameQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> FrameQueue<N> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(FrameQueueInner {
                ring: RingBuffer::new(),
                frames: 0,
            })),
        }
    }

    /// Store a frame whose first byte is its body length.
    ///
    /// Returns `false` (and stores nothing) if the frame does not fit.
    pub fn push(&self, frame: &[u8]) -> bool {
        if frame.is_empty() {
            return false;
        }
        critical_section::with(|cs| {
            let mut inner = self.inner.borrow_ref_mut(cs);
            let accepted = inner.ring.put(frame) == frame.len();
            if accepted {
                inner.frames += 1;
            }
            accepted
        })
    }

    /// Pop the oldest frame's body into `dest`.
    ///
    /// If the frame is larger than `dest`, the whole queue is flushed and 0 is returned.
    /// An empty queue also yields 0.
    pub fn pop(&self, dest: &mut [u8]) -> usize {
        critical_section::with(|cs| {
            let mut inner = self.inner.borrow_ref_mut(cs);
            if inner.ring.is_empty() {
                return 0;
            }
            let mut len = [0u8; 1];
            inner.ring.get(&mut len);
            let len = len[0] as usize;
            if len > dest.len() {
                inner.ring.flush();
                inner.frames = 0;
                return 0;
            }
            inner.frames = inner.frames.saturating_sub(1);
            inner.ring.get(&mut dest[..len])
        })
    }

    /// The body length of the oldest frame (if any).
    pub fn peek_len(&self) -> Option<usize> {
        critical_section::with(|cs| {
            let inner = self.inner.borrow_ref(cs);
            let mut len = [0u8; 1];
            match inner.ring.peek(&mut len) {
                0 => None,
                _ => Some(len[0] as usize),
            }
        })
    }

    /// Number of complete frames buffered.
    pub fn frames(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow_ref(cs).frames)
    }

    /// Number of raw bytes buffered, length prefixes included.
    pub fn bytes(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow_ref(cs).ring.len())
    }

    /// Discard every buffered frame.
    pub fn flush(&self) {
        critical_section::with(|cs| {
            let mut inner = self.inner.borrow_ref_mut(cs);
            inner.ring.flush();
            inner.frames = 0;
        })
    }
}
