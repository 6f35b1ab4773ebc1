use linepick::input::keys::{key_name, KeyChord, KeyEvent, KeyPhase, Modifiers};

#[test]
fn test_ctrl_shift_j_is_order_independent() {
    let ctrl_then_shift = Modifiers::CONTROL.with(Modifiers::SHIFT);
    let shift_then_ctrl = Modifiers::SHIFT.with(Modifiers::CONTROL);

    let a = KeyEvent::new(74, ctrl_then_shift, KeyPhase::Down).chord();
    let b = KeyEvent::new(74, shift_then_ctrl, KeyPhase::Down).chord();

    assert_eq!(a, b);
    assert_eq!(a.to_string(), "Control-Shift-J");
}

#[test]
fn test_all_modifiers_in_canonical_order() {
    let chord = KeyChord::from_code(65, Modifiers::new(true, true, true, true));
    assert_eq!(chord.to_string(), "Control-Alt-Shift-Meta-A");
}

#[test]
fn test_named_and_printable_keys() {
    assert_eq!(key_name(13), "Enter");
    assert_eq!(key_name(27), "Escape");
    assert_eq!(key_name(91), "Meta");
    assert_eq!(key_name(87), "W");
    assert_eq!(key_name(49), "1");
}

#[test]
fn test_parsed_chord_matches_event_chord() {
    let parsed: KeyChord = "Shift-Control-J".parse().unwrap();
    let event = KeyEvent::new(74, Modifiers::new(true, false, true, false), KeyPhase::Up);
    assert_eq!(parsed, event.chord());
}

#[test]
fn test_parse_rejects_modifier_only() {
    assert!("Control-".parse::<KeyChord>().is_err());
    assert!("".parse::<KeyChord>().is_err());
}
