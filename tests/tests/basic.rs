//! Basic mapping integration tests.
//!
//! Plain field-to-field rules in every direction, with and without
//! mandatory markers.

use fieldmap_tests::prelude::*;

mod simple {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("simple")
            .rules("$left <=> $right")
            .forward("left_to_right", fields! { "left" => 10i64 }, |a| {
                a.outputs(fields! { "right" => 10i64 })
            })
            .forward("right_ignored_forward", fields! { "right" => 10i64 }, |a| {
                a.empty()
            })
            .reverse("right_to_left", fields! { "right" => 10i64 }, |a| {
                a.outputs(fields! { "left" => 10i64 })
            })
            .reverse("left_ignored_reverse", fields! { "left" => 10i64 }, |a| {
                a.empty()
            })
    }

    #[test]
    fn test_bidirectional_rule() {
        scenario().run().unwrap();
    }
}

mod unidirectional {
    use super::*;

    pub fn forward_only() -> Scenario {
        Scenario::new("forward_only")
            .rules("$left => $right")
            .forward("forward", fields! { "left" => 10i64 }, |a| {
                a.outputs(fields! { "right" => 10i64 })
            })
            .reverse("reverse", fields! { "right" => 10i64, "left" => 1i64 }, |a| {
                a.empty()
            })
    }

    pub fn reverse_only() -> Scenario {
        Scenario::new("reverse_only")
            .rules("$left <= $right")
            .forward("forward", fields! { "left" => 10i64, "right" => 1i64 }, |a| {
                a.empty()
            })
            .reverse("reverse", fields! { "right" => 10i64 }, |a| {
                a.outputs(fields! { "left" => 10i64 })
            })
    }

    #[test]
    fn test_forward_only_rule() {
        forward_only().run().unwrap();
    }

    #[test]
    fn test_reverse_only_rule() {
        reverse_only().run().unwrap();
    }
}

mod presence {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("presence")
            .rules("$left * <=> $right")
            .rules("$opt <=> $other *")
            .forward("mandatory_missing", fields! {}, |a| {
                a.error_kind(ErrorKind::MissingField)
                    .error("Required left fields missing: left")
                    .error_fields(&["left"])
            })
            .forward("optional_absent", fields! { "left" => 1i64 }, |a| {
                a.outputs(fields! { "right" => 1i64 }).absent("other")
            })
            .reverse("mandatory_on_right", fields! { "right" => 1i64 }, |a| {
                a.error("Required right fields missing: other")
                    .error_matches(r"\(rule: \$opt <=> \$other \*\)$")
            })
            .reverse("both_present", fields! { "right" => 1i64, "other" => 2i64 }, |a| {
                a.outputs(fields! { "left" => 1i64, "opt" => 2i64 })
            })
    }

    #[test]
    fn test_mandatory_and_optional_fields() {
        scenario().run().unwrap();
    }
}

mod multiple_rules {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("multiple_rules")
            .rules(
                "
                $left1 <=> $right1
                $left2 <=> $right2
                ",
            )
            .forward("both", fields! { "left1" => 1i64, "left2" => 2i64 }, |a| {
                a.outputs(fields! { "right1" => 1i64, "right2" => 2i64 })
            })
            .forward("one", fields! { "left2" => 2i64 }, |a| {
                a.outputs(fields! { "right2" => 2i64 })
            })
            .forward("unrelated_input_dropped", fields! { "extra" => "x" }, |a| {
                a.empty()
            })
    }

    #[test]
    fn test_rules_apply_in_order() {
        scenario().run().unwrap();
    }
}

mod failure_is_atomic {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("failure_is_atomic")
            .rules("$a => $x")
            .rules("$b * => $y")
            .forward("second_rule_fails", fields! { "a" => 1i64 }, |a| {
                a.error_kind(ErrorKind::MissingField).error_fields(&["b"])
            })
            .forward("both_succeed", fields! { "a" => 1i64, "b" => 2i64 }, |a| {
                a.outputs(fields! { "x" => 1i64, "y" => 2i64 })
            })
    }

    #[test]
    fn test_failing_call_returns_no_partial_output() {
        scenario().run().unwrap();
    }
}
