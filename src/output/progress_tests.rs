use super::*;

#[test]
fn hidden_in_quiet_mode() {
    let progress = DispatchProgress::new(3, true);
    progress.start_job("M001MT");
    progress.inc();
    progress.finish();
}

#[test]
fn counts_jobs() {
    let progress = DispatchProgress::new_with_visibility(5, true, false);
    for _ in 0..5 {
        progress.inc();
    }
    assert_eq!(progress.position(), 5);
    progress.finish();
}

#[test]
fn visible_bar_accepts_updates() {
    let progress = DispatchProgress::new_with_visibility(2, false, true);
    progress.set_length(4);
    progress.start_job("W011MW");
    progress.inc();
    assert_eq!(progress.position(), 1);
    progress.finish();
}

#[test]
fn clones_share_position() {
    let progress = DispatchProgress::hidden();
    let cloned = progress.clone();

    progress.inc();
    cloned.inc();

    assert_eq!(progress.position(), 2);
}
