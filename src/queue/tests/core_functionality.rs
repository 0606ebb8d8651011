//! Core Functionality Tests - Verify Essential Queue Operations
//!
//! Ordering, length accounting, peek and process behaviour on a single thread.

#[cfg(test)]
mod tests {
    use crate::queue::api::{Priority, PriorityQueue};

    #[test]
    fn test_core_append_next_workflow() {
        let queue = PriorityQueue::new();

        queue.append("first");
        queue.append("second");

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.next(), Some("first"));
        assert_eq!(queue.next(), Some("second"));
        assert_eq!(queue.next(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_append_uses_normal_priority() {
        let queue = PriorityQueue::new();

        queue.append(1);
        assert_eq!(queue.len_priority(Priority::Normal), 1);
        assert_eq!(queue.len_priority(Priority::Low), 0);
        assert_eq!(queue.len_priority(Priority::High), 0);
        assert_eq!(queue.len_priority(Priority::Critical), 0);
    }

    #[test]
    fn test_priority_partitioning_with_fifo_within_level() {
        let queue = PriorityQueue::new();
        let appended = [
            (Priority::Low, "l1"),
            (Priority::High, "h1"),
            (Priority::Normal, "n1"),
            (Priority::Critical, "c1"),
            (Priority::Low, "l2"),
            (Priority::High, "h2"),
            (Priority::Critical, "c2"),
            (Priority::Normal, "n2"),
            (Priority::Low, "l3"),
        ];
        for (priority, item) in appended {
            queue.append_priority(item, priority);
        }

        let mut popped = Vec::new();
        while let Some(item) = queue.next() {
            popped.push(item);
        }

        assert_eq!(
            popped,
            vec!["c1", "c2", "h1", "h2", "n1", "n2", "l1", "l2", "l3"]
        );
    }

    #[test]
    fn test_later_critical_overtakes_earlier_low() {
        let queue = PriorityQueue::new();

        queue.append_priority("old-low", Priority::Low);
        assert_eq!(queue.peek(), Some("old-low"));

        queue.append_priority("new-critical", Priority::Critical);
        assert_eq!(queue.next(), Some("new-critical"));
        assert_eq!(queue.next(), Some("old-low"));
    }

    #[test]
    fn test_len_tracks_appends_minus_pops() {
        let queue = PriorityQueue::new();
        let mut appended = 0usize;
        let mut popped = 0usize;

        for round in 0..50usize {
            let priority = match round % 4 {
                0 => Priority::Low,
                1 => Priority::Normal,
                2 => Priority::High,
                _ => Priority::Critical,
            };
            queue.append_priority(round, priority);
            appended += 1;

            if round % 3 == 0 && queue.next().is_some() {
                popped += 1;
            }

            assert_eq!(queue.len(), appended - popped);
            assert_eq!(queue.is_empty(), queue.len() == 0);
        }

        while queue.next().is_some() {
            popped += 1;
            assert_eq!(queue.len(), appended - popped);
        }
        assert_eq!(appended, popped);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_peek_then_next_return_same_item() {
        let queue = PriorityQueue::new();
        queue.append_priority(String::from("normal"), Priority::Normal);
        queue.append_priority(String::from("high"), Priority::High);

        let len_before = queue.len();
        let peeked = queue.peek();
        assert_eq!(queue.len(), len_before, "peek must not change length");

        let next = queue.next();
        assert_eq!(peeked, next);
        assert_eq!(next.as_deref(), Some("high"));
    }

    #[test]
    fn test_process_orders_by_priority() {
        let queue = PriorityQueue::new();
        queue.append_priority("a", Priority::Low);
        queue.append_priority("b", Priority::Critical);
        queue.append_priority("c", Priority::Normal);

        let mut seen = Vec::new();
        let processed = queue.process(|item| seen.push(item));

        assert_eq!(seen, vec!["b", "c", "a"]);
        assert_eq!(processed, 3);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_process_sees_items_appended_by_callback() {
        let queue = PriorityQueue::new();
        queue.append(3u32);

        let mut seen = Vec::new();
        queue.process(|n| {
            seen.push(n);
            // Lock is not held here, so re-entrant appends are fine
            if n > 0 {
                queue.append(n - 1);
            }
        });

        assert_eq!(seen, vec![3, 2, 1, 0]);
    }

    #[test]
    fn test_default_queue_is_empty() {
        let queue: PriorityQueue<u8> = PriorityQueue::default();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.peek(), None);
    }

    #[test]
    fn test_debug_reports_level_counts() {
        let queue = PriorityQueue::new();
        queue.append_priority(1, Priority::High);
        queue.append_priority(2, Priority::High);

        let rendered = format!("{:?}", queue);
        assert!(rendered.contains("high: 2"), "got: {}", rendered);
        assert!(rendered.contains("ready: true"), "got: {}", rendered);
    }
}
