use review_queue::{ReviewQueue, ReviewQueueError, Summary};

fn pending(queue: &ReviewQueue) -> Vec<usize> {
    queue.pending().collect()
}

#[test]
fn test_three_card_session() {
    // A = 0, B = 1, C = 2
    let mut queue = ReviewQueue::new(3);
    assert_eq!(queue.current(), Some(0));

    queue.mark_unknown().unwrap();
    assert_eq!(pending(&queue), vec![1, 2, 0]);

    assert_eq!(queue.mark_known(), Ok(1));
    assert_eq!(pending(&queue), vec![2, 0]);

    assert_eq!(queue.mark_known(), Ok(2));
    assert_eq!(pending(&queue), vec![0]);

    assert_eq!(queue.mark_known(), Ok(0));
    assert!(queue.is_complete());
    assert_eq!(
        queue.summary(),
        Summary {
            known: 3,
            unknown: 1,
            total: 4
        }
    );
}

#[test]
fn test_single_card_session() {
    let mut queue = ReviewQueue::new(1);

    assert_eq!(queue.mark_unknown(), Ok(0));
    assert_eq!(pending(&queue), vec![0]);
    assert!(!queue.is_complete());

    queue.mark_known().unwrap();
    assert!(queue.is_complete());
    assert_eq!(
        queue.summary(),
        Summary {
            known: 1,
            unknown: 1,
            total: 2
        }
    );
}

#[test]
fn test_decisions_after_completion_fail() {
    let mut queue = ReviewQueue::new(1);
    queue.mark_known().unwrap();

    assert_eq!(queue.mark_known(), Err(ReviewQueueError::InvalidState));
    assert_eq!(queue.mark_unknown(), Err(ReviewQueueError::InvalidState));
    // failed calls leave the tally alone
    assert_eq!(queue.summary().total, 1);
}

#[test]
fn test_partial_summary() {
    let mut queue = ReviewQueue::new(5);
    queue.mark_unknown().unwrap();
    queue.mark_known().unwrap();

    assert!(!queue.is_complete());
    assert_eq!(queue.remaining(), 4);
    assert_eq!(queue.reviewed(), 2);
    assert_eq!(
        queue.summary(),
        Summary {
            known: 1,
            unknown: 1,
            total: 2
        }
    );
}

#[test]
fn test_summary_serializes_with_plain_field_names() {
    let summary = Summary {
        known: 3,
        unknown: 1,
        total: 4,
    };
    let json = serde_json::to_value(summary).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "known": 3, "unknown": 1, "total": 4 })
    );
}
