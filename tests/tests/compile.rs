//! Rule compilation integration tests.
//!
//! Comments, syntax errors and incremental compilation.

use fieldmap_tests::prelude::*;

mod comments {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("comments")
            .rules(
                "
                $left1 => $right1  # comment
                #$left2 => $right2
                ",
            )
            .forward("rule_before_comment", fields! { "left1" => 10i64 }, |a| {
                a.outputs(fields! { "right1" => 10i64 })
            })
            .forward("commented_out_rule", fields! { "left2" => 20i64 }, |a| a.empty())
    }

    #[test]
    fn test_comments_are_ignored() {
        scenario().run().unwrap();
    }
}

mod syntax_errors {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("syntax_errors")
            .rules("$x => $y")
            .compile_named("bad_second_line", "$a => $b\n$c => ]", "mapping.rules", |a| {
                a.error_kind(ErrorKind::Syntax)
                    .error_matches(r"^syntax error in mapping\.rules at line 2, column 7: ")
            })
            .forward("failed_batch_not_installed", fields! { "a" => 1i64, "x" => 2i64 }, |a| {
                a.outputs(fields! { "y" => 2i64 })
            })
            .compile("legacy_tag_syntax", "$a => $b @tag", |a| {
                a.error_kind(ErrorKind::Syntax).error("[tag]")
            })
            .compile("empty_source", "# nothing here\n", |a| {
                a.error_kind(ErrorKind::Syntax).error("end of input")
            })
            .compile("empty_grouping", "() => $b", |a| a.error_kind(ErrorKind::Syntax))
            .compile("unterminated_string", "$a:'abc => $b", |a| {
                a.error_kind(ErrorKind::Syntax)
            })
    }

    #[test]
    fn test_syntax_errors_leave_rules_untouched() {
        scenario().run().unwrap();
    }
}

mod incremental {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("incremental")
            .compile("first", "$a => $out", |a| a.compiled(1))
            .compile("second", "$b => $out\n$c <=> $d [t]", |a| a.compiled(2))
            .forward("last_rule_wins", fields! { "a" => 1i64, "b" => 2i64 }, |a| {
                a.outputs(fields! { "out" => 2i64 })
            })
            .forward("earlier_rule_alone", fields! { "a" => 1i64 }, |a| {
                a.outputs(fields! { "out" => 1i64 })
            })
    }

    pub fn repeated() -> Scenario {
        let rules = "$left <=> $right\nint($n) => $count";
        Scenario::new("repeated")
            .rules(rules)
            .compile("same_text_again", rules, |a| a.compiled(2))
            .forward("same_output", fields! { "left" => 1i64, "n" => "5" }, |a| {
                a.outputs(fields! { "right" => 1i64, "count" => 5i64 })
            })
    }

    #[test]
    fn test_rules_accumulate() {
        scenario().run().unwrap();
    }

    #[test]
    fn test_compiling_twice_is_idempotent_for_output() {
        repeated().run().unwrap();
    }
}

mod processor_api {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_compiled_rules_keep_their_source() {
        let mut processor = Processor::new(Environment::builtins());
        let added = processor
            .add_rules("$a * <=> int($b)  [x, !y]\n$c:int")
            .unwrap();
        assert_eq!(added, 2);

        let sources: Vec<&str> = processor.rules().iter().map(|r| r.source.as_str()).collect();
        assert_eq!(sources, vec!["$a * <=> int($b)  [x, !y]", "$c:int"]);
        assert!(processor.rules()[1].is_mirror());
    }

    #[test]
    fn test_errors_carry_rule_source() {
        let mut processor = Processor::new(Environment::builtins());
        processor.add_rules("$a:'x' => $b").unwrap();

        let err = processor.process(&fields! { "a" => "y" }, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.rule(), Some("$a:'x' => $b"));
        assert_eq!(err.fields(), vec!["a".to_string()]);
    }
}
