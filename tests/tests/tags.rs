//! Tag filtering integration tests.

use fieldmap_tests::prelude::*;

mod single_tag {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("single_tag")
            .rules("$left => $right [tag]")
            .forward_tagged("tag_active", fields! { "left" => 10i64 }, ["tag"], |a| {
                a.outputs(fields! { "right" => 10i64 })
            })
            .forward_tagged("no_tags_active", fields! { "left" => 10i64 }, TagSet::new(), |a| {
                a.empty()
            })
            .forward("no_filter", fields! { "left" => 10i64 }, |a| {
                a.outputs(fields! { "right" => 10i64 })
            })
    }

    #[test]
    fn test_tagged_rule() {
        scenario().run().unwrap();
    }
}

mod multiple_tags {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("multiple_tags")
            .rules("$left => $right [tag1,tag2]")
            .forward_tagged("second_tag_active", fields! { "left" => 10i64 }, ["tag2"], |a| {
                a.outputs(fields! { "right" => 10i64 })
            })
            .forward_tagged("other_tag_active", fields! { "left" => 10i64 }, ["tag3"], |a| {
                a.empty()
            })
            .forward_tagged("no_tags_active", fields! { "left" => 10i64 }, TagSet::new(), |a| {
                a.empty()
            })
            .forward("no_filter", fields! { "left" => 10i64 }, |a| {
                a.outputs(fields! { "right" => 10i64 })
            })
    }

    #[test]
    fn test_any_tag_enables_rule() {
        scenario().run().unwrap();
    }
}

mod negated_tag {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("negated_tag")
            .rules("$left => $right [!tag]")
            .forward("no_filter", fields! { "left" => 10i64 }, |a| {
                a.outputs(fields! { "right" => 10i64 })
            })
            .forward_tagged("other_tag_active", fields! { "left" => 10i64 }, ["tg"], |a| {
                a.outputs(fields! { "right" => 10i64 })
            })
            .forward_tagged("tag_active", fields! { "left" => 10i64 }, ["tag"], |a| {
                a.empty()
            })
    }

    #[test]
    fn test_negated_tag_disables_rule() {
        scenario().run().unwrap();
    }
}

mod reverse_and_untagged {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("reverse_and_untagged")
            .rules(
                "
                $id <=> $key
                $name <=> $label [admin]
                ",
            )
            .reverse_tagged(
                "untagged_rule_always_applies",
                fields! { "key" => 1i64, "label" => "x" },
                ["public"],
                |a| a.outputs(fields! { "id" => 1i64 }),
            )
            .reverse_tagged(
                "tagged_rule_applies",
                fields! { "key" => 1i64, "label" => "x" },
                ["admin", "public"],
                |a| a.outputs(fields! { "id" => 1i64, "name" => "x" }),
            )
    }

    #[test]
    fn test_tags_filter_reverse_transformations() {
        scenario().run().unwrap();
    }
}

mod default_tags {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("default_tags")
            .options(ProcessorOptions::new().with_tags(["web"]))
            .rules("$a => $b [web]")
            .rules("$c => $d [cli]")
            .forward("defaults_apply", fields! { "a" => 1i64, "c" => 2i64 }, |a| {
                a.outputs(fields! { "b" => 1i64 })
            })
            .forward_tagged("call_overrides", fields! { "a" => 1i64, "c" => 2i64 }, ["cli"], |a| {
                a.outputs(fields! { "d" => 2i64 })
            })
    }

    #[test]
    fn test_default_tags_from_options() {
        scenario().run().unwrap();
    }
}
