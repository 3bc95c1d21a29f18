/// Aggregated view of session progress, useful for the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    /// Questions dispatched so far, including the one on screen.
    pub visited: usize,
    /// Pool size at session start.
    pub total: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

impl SessionProgress {
    /// Fraction of the pool visited, in `[0, 1]`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        (self.visited as f32 / self.total as f32).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(visited: usize, total: usize) -> SessionProgress {
        SessionProgress {
            visited,
            total,
            remaining: total.saturating_sub(visited),
            is_complete: visited >= total,
        }
    }

    #[test]
    fn ratio_is_visited_over_total() {
        assert!((progress(1, 4).ratio() - 0.25).abs() < f32::EPSILON);
        assert!((progress(4, 4).ratio() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn ratio_of_empty_pool_is_zero() {
        assert!(progress(0, 0).ratio().abs() < f32::EPSILON);
    }
}
