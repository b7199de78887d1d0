//! Unit tests for lifecycle states

use appinit_domain::value_objects::LifecycleState;

#[test]
fn test_only_created_accepts_registrations() {
    assert!(LifecycleState::Created.accepts_registrations());
    assert!(!LifecycleState::Configured.accepts_registrations());
    assert!(!LifecycleState::Running.accepts_registrations());
    assert!(!LifecycleState::Stopped.accepts_registrations());
}

#[test]
fn test_display_and_serde_agree() {
    for state in [
        LifecycleState::Created,
        LifecycleState::Configured,
        LifecycleState::Running,
        LifecycleState::Stopped,
    ] {
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, format!("\"{state}\""));
    }
}
