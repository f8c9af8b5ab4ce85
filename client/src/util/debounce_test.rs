use super::*;

#[test]
fn newer_arm_supersedes_older() {
    let debouncer = Debouncer::new();
    let first = debouncer.arm();
    let second = debouncer.arm();
    assert!(!debouncer.is_current(first));
    assert!(debouncer.is_current(second));
}

#[test]
fn clones_share_generation() {
    let debouncer = Debouncer::new();
    let handle = debouncer.clone();
    let ticket = debouncer.arm();
    handle.cancel();
    assert!(!debouncer.is_current(ticket));
}

#[test]
fn call_supersedes_pending_ticket() {
    let debouncer = Debouncer::new();
    let ticket = debouncer.arm();
    debouncer.call(SEARCH_DEBOUNCE_MS, || {});
    assert!(!debouncer.is_current(ticket));
}
