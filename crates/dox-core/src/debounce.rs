//! Input debouncer: turns a stream of keystroke-level query edits into
//! committed active queries.
//!
//! Every change to the raw query restarts a quiet-period countdown. When the
//! countdown elapses without another change, the current raw value is
//! committed. Only the last value in a burst survives.

use std::time::Duration;

use tokio::sync::{mpsc, watch};

/// Quiet period used when the configuration does not override it.
pub const DEFAULT_QUIET: Duration = Duration::from_millis(300);

/// Run the debouncer until the raw-query sender or the commit receiver is
/// dropped.
///
/// `initial` is the value already committed downstream. Every change the
/// receiver has not yet seen is debounced, including changes made before
/// the task is first polled. A commit equal to the previous one is not
/// re-sent. A countdown still pending when `raw` closes is dropped.
pub async fn run(
    mut raw: watch::Receiver<String>,
    initial: String,
    quiet: Duration,
    committed: mpsc::UnboundedSender<String>,
) {
    let mut last = initial;

    'outer: loop {
        if raw.changed().await.is_err() {
            break;
        }

        // A change arrived: wait for a quiet window, restarting on each edit.
        loop {
            tokio::select! {
                changed = raw.changed() => {
                    if changed.is_err() {
                        tracing::debug!("debounce: input closed with pending edit");
                        break 'outer;
                    }
                }
                _ = tokio::time::sleep(quiet) => break,
            }
        }

        let value = raw.borrow_and_update().clone();
        if value == last {
            tracing::debug!(query = %value, "debounce: unchanged, not committing");
            continue;
        }

        tracing::debug!(query = %value, "debounce: committed");
        last = value.clone();
        if committed.send(value).is_err() {
            break;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use tokio::time::{advance, sleep};

    const D: Duration = DEFAULT_QUIET;

    struct Harness {
        raw: watch::Sender<String>,
        out: mpsc::UnboundedReceiver<String>,
        task: tokio::task::JoinHandle<()>,
    }

    fn spawn() -> Harness {
        let (raw, raw_rx) = watch::channel(String::new());
        let (tx, out) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(raw_rx, String::new(), D, tx));
        Harness { raw, out, task }
    }

    /// Let spawned tasks observe everything that is ready.
    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    fn drain(out: &mut mpsc::UnboundedReceiver<String>) -> Vec<String> {
        let mut got = Vec::new();
        while let Ok(v) = out.try_recv() {
            got.push(v);
        }
        got
    }

    #[tokio::test(start_paused = true)]
    async fn typing_within_the_window_commits_once() {
        let mut h = spawn();
        settle().await;

        // "cancer" typed over 200ms: one keystroke every 40ms.
        let word = "cancer";
        for i in 1..=word.len() {
            h.raw.send_replace(word[..i].to_string());
            settle().await;
            sleep(Duration::from_millis(40)).await;
        }
        assert!(drain(&mut h.out).is_empty(), "nothing commits mid-burst");

        sleep(D).await;
        settle().await;
        assert_eq!(drain(&mut h.out), vec!["cancer".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn edit_before_first_poll_is_committed() {
        let mut h = spawn();
        // No settle: the task has not run yet when the edit lands.
        h.raw.send_replace("flu".into());

        sleep(D * 2).await;
        settle().await;
        assert_eq!(drain(&mut h.out), vec!["flu".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn commit_waits_for_the_full_quiet_period() {
        let mut h = spawn();
        settle().await;

        h.raw.send_replace("flu".into());
        settle().await;
        advance(D - Duration::from_millis(1)).await;
        settle().await;
        assert!(drain(&mut h.out).is_empty());

        advance(Duration::from_millis(2)).await;
        settle().await;
        assert_eq!(drain(&mut h.out), vec!["flu".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn edit_restarts_the_countdown() {
        let mut h = spawn();
        settle().await;

        h.raw.send_replace("a".into());
        settle().await;
        advance(Duration::from_millis(250)).await;
        settle().await;
        h.raw.send_replace("ab".into());
        settle().await;
        advance(Duration::from_millis(250)).await;
        settle().await;
        assert!(drain(&mut h.out).is_empty(), "250ms after the last edit is too early");

        advance(Duration::from_millis(60)).await;
        settle().await;
        assert_eq!(drain(&mut h.out), vec!["ab".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn clearing_is_debounced_like_any_edit() {
        let mut h = spawn();
        settle().await;

        h.raw.send_replace("asthma".into());
        settle().await;
        sleep(D * 2).await;
        settle().await;
        assert_eq!(drain(&mut h.out), vec!["asthma".to_string()]);

        h.raw.send_replace(String::new());
        settle().await;
        advance(Duration::from_millis(100)).await;
        settle().await;
        assert!(drain(&mut h.out).is_empty());

        sleep(D).await;
        settle().await;
        assert_eq!(drain(&mut h.out), vec![String::new()]);
    }

    #[tokio::test(start_paused = true)]
    async fn returning_to_the_committed_value_does_not_recommit() {
        let mut h = spawn();
        settle().await;

        h.raw.send_replace("gout".into());
        settle().await;
        sleep(D * 2).await;
        settle().await;
        assert_eq!(drain(&mut h.out), vec!["gout".to_string()]);

        h.raw.send_replace("gou".into());
        settle().await;
        h.raw.send_replace("gout".into());
        settle().await;
        sleep(D * 2).await;
        settle().await;
        assert!(drain(&mut h.out).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn closing_input_stops_the_task_without_committing() {
        let Harness { raw, mut out, task } = spawn();
        settle().await;

        raw.send_replace("pending".into());
        settle().await;
        drop(raw);

        task.await.unwrap();
        assert!(drain(&mut out).is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Any burst of edits spaced closer than the quiet period commits
        /// only its final value.
        #[test]
        fn bursts_coalesce_to_the_last_value(
            edits in prop::collection::vec(("[a-z ]{0,8}", 0u64..300), 1..12)
        ) {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .start_paused(true)
                .build()
                .unwrap();

            let committed = rt.block_on(async {
                let mut h = spawn();
                settle().await;
                for (text, gap_ms) in &edits {
                    h.raw.send_replace(text.clone());
                    settle().await;
                    // Strictly less than D between edits.
                    advance(Duration::from_millis(*gap_ms % 300)).await;
                    settle().await;
                }
                sleep(D * 2).await;
                settle().await;
                drain(&mut h.out)
            });

            let last = edits.last().map(|(t, _)| t.clone()).unwrap();
            if last.is_empty() {
                // Equal to the initial committed value, so nothing is sent.
                prop_assert!(committed.is_empty());
            } else {
                prop_assert_eq!(committed, vec![last]);
            }
        }
    }
}
