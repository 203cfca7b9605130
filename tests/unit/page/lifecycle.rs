use super::*;

#[test]
fn single_transition() {
    let mut state = PageLifecycle::default();
    assert!(!state.is_loaded());
    assert!(state.mark_loaded());
    assert!(!state.mark_loaded());
    assert!(state.is_loaded());
}
