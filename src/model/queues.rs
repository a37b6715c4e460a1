// src/model/queues.rs

use std::collections::VecDeque;

/// A fixed-delay pipeline: whatever enters at the end of day `d` leaves at
/// the start of day `d + delay`.
#[derive(Debug, Clone)]
pub struct TimeDelayQueue {
    buffer: VecDeque<f64>,
}

impl TimeDelayQueue {
    pub fn new(delay: usize) -> Self {
        // Pre-fill with 0s so items take time to traverse the pipe
        let mut buffer = VecDeque::with_capacity(delay + 1);
        buffer.extend(std::iter::repeat(0.0).take(delay));
        Self { buffer }
    }

    /// Items reaching the destination. Call at the START of a day.
    pub fn pop_arrival(&mut self) -> f64 {
        self.buffer.pop_front().unwrap_or(0.0)
    }

    /// Items entering the pipeline. Call at the END of a day.
    pub fn push_departure(&mut self, quantity: f64) {
        self.buffer.push_back(quantity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrives_after_delay() {
        let mut queue = TimeDelayQueue::new(3);
        queue.push_departure(50.0);
        let arrivals: Vec<f64> = (0..5).map(|_| queue.pop_arrival()).collect();
        assert_eq!(arrivals, vec![0.0, 0.0, 0.0, 50.0, 0.0]);
    }

    #[test]
    fn zero_delay_is_passthrough() {
        let mut queue = TimeDelayQueue::new(0);
        assert_eq!(queue.pop_arrival(), 0.0);
        queue.push_departure(7.0);
        assert_eq!(queue.pop_arrival(), 7.0);
    }
}
