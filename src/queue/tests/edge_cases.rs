//! Edge case tests: re-entrant calls from callbacks and unusual values

#[cfg(test)]
mod tests {
    use crate::queue::api::{ProQueue, QueueError};
    use crate::queue::tests::helpers::recorder;
    use std::sync::{mpsc, Arc, Mutex, OnceLock};
    use std::time::Duration;

    #[test]
    fn test_callback_can_push_to_its_own_queue() {
        let (seen, record) = recorder::<u32>();
        let slot: Arc<OnceLock<Arc<ProQueue<u32>>>> = Arc::new(OnceLock::new());

        let queue = {
            let slot = Arc::clone(&slot);
            Arc::new(
                ProQueue::builder()
                    .callback(record)
                    .callback(move |value: &mut u32| {
                        if *value < 3 {
                            if let Some(queue) = slot.get() {
                                queue.push(*value + 10);
                            }
                        }
                    })
                    .spawn()
                    .unwrap(),
            )
        };
        assert!(slot.set(Arc::clone(&queue)).is_ok());

        queue.push_all(0..3);
        while queue.stats().processed < 6 {
            std::thread::yield_now();
        }
        queue.stop().unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2, 10, 11, 12]);
    }

    #[test]
    fn test_callback_can_register_callbacks() {
        let (seen, record) = recorder::<u32>();
        let late = Arc::new(Mutex::new(Vec::new()));
        let slot: Arc<OnceLock<Arc<ProQueue<u32>>>> = Arc::new(OnceLock::new());

        let queue = {
            let slot = Arc::clone(&slot);
            let late = Arc::clone(&late);
            Arc::new(
                ProQueue::builder()
                    .callback(record)
                    .callback(move |value: &mut u32| {
                        if *value == 0 {
                            if let Some(queue) = slot.get() {
                                let late = Arc::clone(&late);
                                queue
                                    .add_callback(move |v: &mut u32| {
                                        late.lock().unwrap().push(*v)
                                    })
                                    .unwrap();
                            }
                        }
                    })
                    .spawn()
                    .unwrap(),
            )
        };
        assert!(slot.set(Arc::clone(&queue)).is_ok());

        queue.push_all(0..3);
        while queue.stats().processed < 3 {
            std::thread::yield_now();
        }
        queue.stop().unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
        // Registered while value 0 was in flight, so it starts with value 1
        assert_eq!(*late.lock().unwrap(), vec![1, 2]);
        assert_eq!(queue.tasks_count(), 3);
    }

    #[test]
    fn test_stop_from_callback_is_rejected() {
        let outcome: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
        let slot: Arc<OnceLock<Arc<ProQueue<u32>>>> = Arc::new(OnceLock::new());

        let queue = {
            let slot = Arc::clone(&slot);
            let outcome = Arc::clone(&outcome);
            Arc::new(
                ProQueue::new(move |_: &mut u32| {
                    if let Some(queue) = slot.get() {
                        let result = queue.stop();
                        *outcome.lock().unwrap() = Some(format!("{:?}", result));
                    }
                })
                .unwrap(),
            )
        };
        assert!(slot.set(Arc::clone(&queue)).is_ok());

        queue.push(1);
        queue.stop().unwrap();

        let recorded = outcome.lock().unwrap().clone().unwrap();
        assert!(recorded.contains("StopFromWorker"), "got {}", recorded);
    }

    #[test]
    fn test_push_all_iterator_can_inspect_queue() {
        let (seen, record) = recorder::<u32>();
        let queue = Arc::new(ProQueue::new(record).unwrap());

        let (done_tx, done_rx) = mpsc::channel();
        let producer = {
            let queue = Arc::clone(&queue);
            std::thread::spawn(move || {
                let inner = Arc::clone(&queue);
                queue.push_all((0..3).map(move |i| {
                    inner.size();
                    i
                }));
                let _ = done_tx.send(());
            })
        };

        assert!(
            done_rx.recv_timeout(Duration::from_secs(5)).is_ok(),
            "push_all blocked while its iterator queried the queue"
        );
        producer.join().unwrap();
        queue.stop().unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_panicking_batch_leaves_queue_untouched() {
        let (seen, record) = recorder::<u32>();
        let queue = ProQueue::new(record).unwrap();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            queue.push_all((0..5).map(|i| {
                if i == 3 {
                    panic!("batch source failed");
                }
                i
            }));
        }));
        assert!(result.is_err());

        queue.push(7);
        queue.stop().unwrap();

        let stats = queue.stats();
        assert_eq!(stats.pushed, 1);
        assert_eq!(stats.processed, 1);
        assert_eq!(*seen.lock().unwrap(), vec![7]);
    }

    #[test]
    fn test_zero_sized_values() {
        let count = Arc::new(Mutex::new(0usize));
        let counter = Arc::clone(&count);
        let queue = ProQueue::new(move |_: &mut ()| *counter.lock().unwrap() += 1).unwrap();

        for _ in 0..100 {
            queue.push(());
        }
        queue.stop().unwrap();
        assert_eq!(*count.lock().unwrap(), 100);
    }

    #[test]
    fn test_callbacks_can_shrink_values() {
        let (seen, record) = recorder::<usize>();
        let queue = ProQueue::builder()
            .callback(|buffer: &mut Vec<u8>| buffer.truncate(1))
            .callback(move |buffer: &mut Vec<u8>| record(&mut buffer.len()))
            .spawn()
            .unwrap();

        queue.push(vec![0u8; 1 << 20]);
        queue.stop().unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![1]);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            QueueError::CapacityExceeded { max: 10 }.to_string(),
            "Callback registry is full (max callbacks: 10)"
        );
        assert_eq!(QueueError::EmptyQueueAccess.to_string(), "Queue is empty");
    }
}
