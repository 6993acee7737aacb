use splat_edit::{SelectOp, SplatState, StateRule};

use crate::common::given;

#[test]
fn test_state_rule_revert_when_filter_accepts_should_invert_apply() {
    for rule in given::state_rules() {
        for state in given::all_states() {
            for hit in [false, true] {
                if rule.filter(state, hit) {
                    assert_eq!(
                        rule.revert(rule.apply(state)),
                        state,
                        "{rule:?} on {state:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_state_rule_select_set_when_filtered_should_touch_only_differing_states() {
    let rule = StateRule::Select(SelectOp::Set);

    assert!(rule.filter(SplatState::NORMAL, true));
    assert!(!rule.filter(SplatState::NORMAL, false));
    assert!(rule.filter(SplatState::SELECT, false));
    assert!(!rule.filter(SplatState::SELECT, true));

    assert_eq!(rule.apply(SplatState::NORMAL), SplatState::SELECT);
    assert_eq!(rule.apply(SplatState::SELECT), SplatState::NORMAL);
}

#[test]
fn test_state_rule_select_add_when_filtered_should_skip_hidden_and_deleted() {
    let rule = StateRule::Select(SelectOp::Add);

    assert!(rule.filter(SplatState::NORMAL, true));
    assert!(!rule.filter(SplatState::NORMAL, false));
    assert!(!rule.filter(SplatState::HIDE, true));
    assert!(!rule.filter(SplatState::DELETE, true));
    assert!(!rule.filter(SplatState::SELECT, true));
}

#[test]
fn test_state_rule_select_remove_when_filtered_should_touch_selected_hits() {
    let rule = StateRule::Select(SelectOp::Remove);

    assert!(rule.filter(SplatState::SELECT, true));
    assert!(!rule.filter(SplatState::SELECT, false));
    assert!(!rule.filter(SplatState::NORMAL, true));
    assert_eq!(rule.apply(SplatState::SELECT), SplatState::NORMAL);
}

#[test]
fn test_state_rule_when_not_select_should_ignore_predicate() {
    for rule in given::state_rules() {
        if rule.uses_predicate() {
            continue;
        }

        for state in given::all_states() {
            assert_eq!(rule.filter(state, true), rule.filter(state, false), "{rule:?}");
        }
    }
}

#[test]
fn test_state_rule_delete_when_applied_should_set_delete_bit() {
    let rule = StateRule::Delete;

    assert!(rule.filter(SplatState::SELECT, false));
    assert!(!rule.filter(SplatState::NORMAL, false));
    assert_eq!(
        rule.apply(SplatState::SELECT),
        SplatState::SELECT | SplatState::DELETE
    );
    assert_eq!(
        rule.revert(SplatState::SELECT | SplatState::DELETE),
        SplatState::SELECT
    );
}

#[test]
fn test_state_rule_unhide_and_reset_when_filtered_should_match_hidden_and_deleted() {
    let hidden = SplatState::SELECT | SplatState::HIDE;
    let deleted = SplatState::SELECT | SplatState::DELETE;
    let both = SplatState::HIDE | SplatState::DELETE;

    assert!(StateRule::Unhide.filter(hidden, false));
    assert!(!StateRule::Unhide.filter(both, false));
    assert!(StateRule::Reset.filter(deleted, false));
    assert!(StateRule::Reset.filter(both, false));
    assert!(!StateRule::SelectInverse.filter(hidden, false));
    assert!(!StateRule::SelectInverse.filter(deleted, false));
}
