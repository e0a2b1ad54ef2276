#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use crate::*;

    fn init_logs() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn echo_props(props: &Record) -> Result<Record, HookError> {
        Ok(props.clone())
    }

    fn use_one(_: &Record) -> Record {
        record! { "a" => 4 }
    }

    fn use_two(_: &Record) -> Record {
        record! { "b" => 2 }
    }

    fn use_add(props: &Record) -> Record {
        let a = props.get("a").and_then(Value::as_int).unwrap_or_default();
        let b = props.get("b").and_then(Value::as_int).unwrap_or_default();
        record! { "sum" => a + b }
    }

    #[test]
    fn test_no_hooks_is_identity() {
        let props = record! { "text" => "here" };
        assert_eq!(compose(&[], &props).unwrap(), props);

        let composed = compose_hooks(hooks![]).bind(echo_props);
        assert_eq!(composed.render(&props).unwrap(), echo_props(&props).unwrap());
    }

    #[test]
    fn test_hook_reads_props_and_feeds_component() {
        let use_hello = |props: &Record| {
            let text = props.get("text").cloned().unwrap_or_default();
            record! { "hello_text" => format!("Hello, I say, {text}") }
        };
        let composed = compose_hooks([Hook::new("use_hello", use_hello)]).bind(
            |props: &Record| -> Result<String, HookError> {
                Ok(props.get("hello_text").map(Value::to_string).unwrap_or_default())
            },
        );

        let out = composed.render(&record! { "text" => "testing" }).unwrap();
        assert_eq!(out, "Hello, I say, testing");
    }

    #[test]
    fn test_sequential_hooks_sum() {
        init_logs();
        let out = compose(&hooks![use_one, use_two, use_add], &Record::new()).unwrap();
        assert_eq!(out, record! { "a" => 4, "b" => 2, "sum" => 6 });
    }

    #[test]
    fn test_later_hook_sees_earlier_keys() {
        let seen = Rc::new(RefCell::new(None));
        let probe = {
            let seen = seen.clone();
            Hook::new("probe", move |props: &Record| {
                *seen.borrow_mut() = props.get("a").cloned();
                Value::Null
            })
        };

        compose(&[hook!(use_one), probe], &Record::new()).unwrap();
        assert_eq!(*seen.borrow(), Some(Value::Int(4)));
    }

    #[test]
    fn test_input_wins_over_hooks() {
        let props = record! { "a" => 1, "name" => "caller" };
        let hooks = [
            Hook::new("use_clobber", |_: &Record| record! { "a" => 99, "name" => "hook" }),
            hook!(use_add),
        ];

        let out = compose(&hooks, &props).unwrap();
        assert_eq!(out.get("a"), Some(&Value::Int(1)));
        assert_eq!(out.get("name"), Some(&Value::from("caller")));
        // use_add saw the caller's `a`, not the clobbered one
        assert_eq!(out.get("sum"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_hook_view_is_shadowed_by_input() {
        let seen = Rc::new(Cell::new(0));
        let hooks = [
            Hook::new("use_a", |_: &Record| record! { "a" => 50 }),
            {
                let seen = seen.clone();
                Hook::new("use_read", move |props: &Record| {
                    seen.set(props.get("a").and_then(Value::as_int).unwrap_or(-1));
                    Value::Null
                })
            },
        ];

        compose(&hooks, &record! { "a" => 7 }).unwrap();
        assert_eq!(seen.get(), 7);
    }

    #[test]
    fn test_first_hook_wins() {
        let hooks = [
            Hook::new("use_first", |_: &Record| record! { "k" => "first" }),
            Hook::new("use_second", |_: &Record| record! { "k" => "second", "extra" => true }),
        ];

        let out = compose(&hooks, &Record::new()).unwrap();
        assert_eq!(out.get("k"), Some(&Value::from("first")));
        assert_eq!(out.get("extra"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_non_record_result_keyed_by_name() {
        let out = compose(
            &[Hook::new("use_x", |_: &Record| 42)],
            &record! { "y" => 1 },
        )
        .unwrap();
        assert_eq!(out, record! { "use_x" => 42, "y" => 1 });
    }

    #[test]
    fn test_non_record_result_respects_precedence() {
        let hooks = [
            Hook::new("use_x", |_: &Record| record! { "use_x" => "from record" }),
            Hook::new("use_x", |_: &Record| "from scalar"),
        ];
        let out = compose(&hooks, &Record::new()).unwrap();
        assert_eq!(out.get("use_x"), Some(&Value::from("from record")));

        let out = compose(&hooks[1..], &record! { "use_x" => "input" }).unwrap();
        assert_eq!(out.get("use_x"), Some(&Value::from("input")));
    }

    #[test]
    fn test_tuple_result_with_callable() {
        fn use_test_hook(_: &Record) -> Value {
            let something = record! { "text" => "using something" };
            let set_something = Callback::new(|args| Ok(args.first().cloned().unwrap_or_default()));
            Value::List(vec![something.into(), set_something.into()])
        }

        let composed = compose_hooks(hooks![use_test_hook]).bind(
            |props: &Record| -> Result<(String, Value), HookError> {
                let pair = props
                    .get("use_test_hook")
                    .and_then(Value::as_list)
                    .ok_or_else(|| HookError::failed("missing use_test_hook"))?;
                let text = pair[0]
                    .as_record()
                    .and_then(|r| r.get("text"))
                    .map(Value::to_string)
                    .unwrap_or_default();
                let called = pair[1].call(&[Value::from("something was set")])?;
                Ok((text, called))
            },
        );

        let (text, called) = composed.render(&Record::new()).unwrap();
        assert_eq!(text, "using something");
        assert_eq!(called, Value::from("something was set"));
    }

    #[test]
    fn test_failing_hook_aborts_fold() {
        let ran_after = Rc::new(Cell::new(false));
        let hooks = [
            hook!(use_one),
            Hook::fallible("use_broken", |_: &Record| Err(HookError::failed("boom"))),
            {
                let ran_after = ran_after.clone();
                Hook::new("use_after", move |_: &Record| {
                    ran_after.set(true);
                    Value::Null
                })
            },
        ];

        let err = compose(&hooks, &Record::new()).unwrap_err();
        assert!(matches!(&err, HookError::Failed(msg) if msg == "boom"));
        assert!(!ran_after.get());
    }

    #[test]
    fn test_failing_hook_reaches_binder_caller() {
        fn use_fails(_: &Record) -> HookResult {
            Err(anyhow::anyhow!("fetch refused").into())
        }
        let rendered = Rc::new(Cell::new(false));
        let composed = compose_hooks([hook!(use_fails?)]).bind({
            let rendered = rendered.clone();
            move |_: &Record| -> Result<(), HookError> {
                rendered.set(true);
                Ok(())
            }
        });

        let err = composed.render(&Record::new()).unwrap_err();
        assert!(matches!(err, HookError::Other(_)));
        assert_eq!(err.to_string(), "fetch refused");
        assert!(!rendered.get());
    }

    #[test]
    fn test_calling_non_callable_fails_at_call_time() {
        let out = compose(
            &[Hook::new("use_setter", |_: &Record| "not a function")],
            &Record::new(),
        )
        .unwrap();

        let err = out.get("use_setter").unwrap().call(&[]).unwrap_err();
        assert!(matches!(err, HookError::NotCallable { found: "text" }));
    }

    #[test]
    fn test_input_not_mutated() {
        let props = record! { "a" => 1 };
        let before = props.clone();
        let composed = compose_hooks(hooks![use_one, use_two]).bind(echo_props);

        let out = composed.render(&props).unwrap();
        assert_eq!(props, before);
        assert_eq!(out, record! { "a" => 1, "b" => 2 });
    }

    #[test]
    fn test_hooks_run_once_per_render_in_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let tracer = |name: &'static str| {
            let order = order.clone();
            Hook::new(name, move |_: &Record| {
                order.borrow_mut().push(name);
                Value::Null
            })
        };
        let composed = compose_hooks([tracer("use_a"), tracer("use_b"), tracer("use_c")])
            .bind(echo_props);

        composed.render(&Record::new()).unwrap();
        composed.render(&Record::new()).unwrap();
        assert_eq!(
            *order.borrow(),
            ["use_a", "use_b", "use_c", "use_a", "use_b", "use_c"]
        );
    }

    #[test]
    fn test_macro_names_follow_identifiers() {
        let hs = hooks![use_one, use_add];
        let names: Vec<_> = hs.iter().map(Hook::name).collect();
        assert_eq!(names, ["use_one", "use_add"]);
        assert_eq!(format!("{:?}", Compose::new(hs)), r#"["use_one", "use_add"]"#);
    }

    #[test]
    fn test_nested_composition() {
        let inner = compose_hooks(hooks![use_add]).bind(echo_props);
        let outer = compose_hooks(hooks![use_one, use_two]).bind(inner);

        let out = outer.render(&Record::new()).unwrap();
        assert_eq!(out, record! { "a" => 4, "b" => 2, "sum" => 6 });
    }

    #[test]
    fn test_value_display_and_equality() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::from(vec![Value::from("a"), Value::Int(1)]).to_string(), "a1");
        assert_eq!(Value::Int(3).as_float(), Some(3.0));

        let cb = Callback::new(|_| Ok(Value::Null));
        assert_eq!(Value::from(cb.clone()), Value::from(cb));
        assert_ne!(
            Value::from(Callback::new(|_| Ok(Value::Null))),
            Value::from(Callback::new(|_| Ok(Value::Null)))
        );

        let opaque = Value::opaque(5u8);
        assert_eq!(opaque.downcast_ref::<u8>(), Some(&5));
        assert_eq!(opaque.clone(), opaque);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_bridge() {
        let props = Record::from_json(serde_json::json!({ "a": 1, "list": [true, "x"] })).unwrap();
        assert_eq!(props.get("a"), Some(&Value::Int(1)));
        assert_eq!(
            props.to_json(),
            Some(serde_json::json!({ "a": 1, "list": [true, "x"] }))
        );

        let with_cb = props.with("cb", Callback::new(|_| Ok(Value::Null)));
        assert_eq!(with_cb.to_json(), None);
        assert!(serde_json::to_string(&with_cb).is_err());
        assert!(Record::from_json(serde_json::json!([1, 2])).is_none());
    }
}
