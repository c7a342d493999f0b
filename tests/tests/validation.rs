//! Validator integration tests.
//!
//! Every validator form: callables, literals, collections, environment
//! names and other fields.

use fieldmap_tests::prelude::*;

mod callable {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("callable_validator")
            .rules("$left:int => $right")
            .forward("int_passes", fields! { "left" => 10i64 }, |a| {
                a.outputs(fields! { "right" => 10i64 })
            })
            .forward("numeric_string_not_coerced", fields! { "left" => "10" }, |a| {
                a.outputs(fields! { "right" => "10" })
            })
            .forward("rejected", fields! { "left" => "10a" }, |a| {
                a.error_kind(ErrorKind::Validation)
                    .error("invalid value for field 'left'")
                    .error_fields(&["left"])
            })
    }

    pub fn predicate() -> Scenario {
        let positive = Function::predicate("positive", |v| v.as_int().is_some_and(|n| n > 0));
        Scenario::new("predicate_validator")
            .env(Environment::builtins().with("positive", positive))
            .rules("$n:int:positive => $count")
            .rules("$m:int, positive => $other")
            .forward("chained_passes", fields! { "n" => 3i64, "m" => 4i64 }, |a| {
                a.outputs(fields! { "count" => 3i64, "other" => 4i64 })
            })
            .forward("chained_rejects", fields! { "n" => -3i64 }, |a| {
                a.error_kind(ErrorKind::Validation).error_fields(&["n"])
            })
            .forward("comma_rejects", fields! { "m" => 0i64 }, |a| {
                a.error_kind(ErrorKind::Validation).error_fields(&["m"])
            })
    }

    #[test]
    fn test_callable_validator() {
        scenario().run().unwrap();
    }

    #[test]
    fn test_chained_validators() {
        predicate().run().unwrap();
    }
}

mod literals {
    use super::*;

    pub fn strings() -> Scenario {
        Scenario::new("string_literals")
            .rules("$double:\"value\" => $a")
            .rules("$single:'value' => $b")
            .forward("both_match", fields! { "double" => "value", "single" => "value" }, |a| {
                a.outputs(fields! { "a" => "value", "b" => "value" })
            })
            .forward("double_mismatch", fields! { "double" => "val" }, |a| {
                a.error_kind(ErrorKind::Validation)
            })
            .forward("single_mismatch", fields! { "single" => "val1" }, |a| {
                a.error_kind(ErrorKind::Validation)
            })
            .forward("no_substring_match", fields! { "single" => "valu" }, |a| {
                a.error_kind(ErrorKind::Validation)
            })
    }

    pub fn numbers() -> Scenario {
        Scenario::new("number_literals")
            .rules("$int:10 => $a")
            .rules("$float:10.0 => $b")
            .forward("match", fields! { "int" => 10i64, "float" => 10.0f64 }, |a| {
                a.outputs(fields! { "a" => 10i64, "b" => 10.0f64 })
            })
            .forward("int_mismatch", fields! { "int" => 11i64 }, |a| {
                a.error_kind(ErrorKind::Validation)
            })
            .forward("float_mismatch", fields! { "float" => 10.1f64 }, |a| {
                a.error_kind(ErrorKind::Validation)
            })
    }

    #[test]
    fn test_string_literal_validators() {
        strings().run().unwrap();
    }

    #[test]
    fn test_number_literal_validators() {
        numbers().run().unwrap();
    }
}

mod collections {
    use super::*;

    fn membership(name: &str, rule: &str, ok: i64, bad: i64) -> Scenario {
        Scenario::new(name)
            .rules(rule)
            .forward("member", fields! { "left" => ok }, |a| {
                a.outputs(fields! { "right" => ok })
            })
            .forward("not_member", fields! { "left" => bad }, |a| {
                a.error_kind(ErrorKind::Validation).error("is not one of")
            })
    }

    #[test]
    fn test_tuple_validator() {
        membership("tuple", "$left:(1,2,3) => $right", 2, 4).run().unwrap();
    }

    #[test]
    fn test_single_entry_tuple_validator() {
        membership("single_tuple", "$left:(1,) => $right", 1, 2).run().unwrap();
    }

    #[test]
    fn test_list_validator() {
        membership("list", "$left:[1,2,3] => $right", 2, 4).run().unwrap();
    }

    #[test]
    fn test_constructed_validator() {
        membership("constructed", "$left:set((1,2)) => $right", 1, 3).run().unwrap();
    }
}

mod names {
    use super::*;

    pub fn environment() -> Scenario {
        Scenario::new("environment_name")
            .env(Environment::builtins().with("verify", "test"))
            .rules("$left:verify * => $right")
            .forward("match", fields! { "left" => "test" }, |a| {
                a.outputs(fields! { "right" => "test" })
            })
            .forward("mismatch", fields! { "left" => "value" }, |a| {
                a.error_kind(ErrorKind::Validation).error("does not equal")
            })
            .forward_with(
                "local_shadows_environment",
                fields! { "left" => "value" },
                Environment::new().with("verify", "value"),
                |a| a.outputs(fields! { "right" => "value" }),
            )
    }

    pub fn field() -> Scenario {
        Scenario::new("field_validator")
            .rules("$password:$verify * => $secret")
            .forward("equal", fields! { "password" => "pw", "verify" => "pw" }, |a| {
                a.outputs(fields! { "secret" => "pw" })
            })
            .forward("different", fields! { "password" => "pw", "verify" => "px" }, |a| {
                a.error_kind(ErrorKind::Validation).error_fields(&["password"])
            })
            .forward("validator_field_missing", fields! { "password" => "pw" }, |a| {
                a.error_kind(ErrorKind::MissingField).error_fields(&["verify"])
            })
    }

    #[test]
    fn test_environment_name_validator() {
        environment().run().unwrap();
    }

    #[test]
    fn test_field_validator() {
        field().run().unwrap();
    }
}
