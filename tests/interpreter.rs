#[cfg(test)]
mod interpreter_tests {
    use jlox as lox;

    use lox::error::Reporter;
    use lox::interpreter::Interpreter;

    // Run a program against a fresh interpreter and return its captured
    // output plus the reporter flags (compile error, runtime error).
    fn run_program(code: &str) -> (String, bool, bool) {
        let mut buffer: Vec<u8> = Vec::new();

        let (had_error, had_runtime_error) = {
            let mut interpreter: Interpreter = Interpreter::new(&mut buffer);
            let mut reporter: Reporter = Reporter::new();

            lox::run(code, &mut interpreter, &mut reporter);

            (reporter.had_error(), reporter.had_runtime_error())
        };

        (
            String::from_utf8(buffer).expect("program output should be UTF-8"),
            had_error,
            had_runtime_error,
        )
    }

    fn run_ok(code: &str) -> String {
        let (output, had_error, had_runtime_error) = run_program(code);

        assert!(!had_error, "unexpected compile error in {:?}", code);
        assert!(!had_runtime_error, "unexpected runtime error in {:?}", code);

        output
    }

    fn expect_compile_error(code: &str) {
        let (_, had_error, _) = run_program(code);
        assert!(had_error, "expected a compile error in {:?}", code);
    }

    fn expect_runtime_error(code: &str) -> String {
        let (output, had_error, had_runtime_error) = run_program(code);

        assert!(!had_error, "unexpected compile error in {:?}", code);
        assert!(had_runtime_error, "expected a runtime error in {:?}", code);

        output
    }

    // ── Basics ───────────────────────────────────────────────────────────────

    #[test]
    fn empty_program_produces_no_output() {
        assert_eq!(run_ok(""), "");
    }

    #[test]
    fn print_nil() {
        assert_eq!(run_ok("print nil;"), "nil\n");
    }

    #[test]
    fn arithmetic_precedence() {
        assert_eq!(run_ok("print 1 + 2 * 3;"), "7\n");
    }

    #[test]
    fn grouping_overrides_precedence() {
        assert_eq!(run_ok("print (1 + 2) * 3;"), "9\n");
    }

    #[test]
    fn number_formatting_trims_integral_values() {
        assert_eq!(run_ok("print 4 / 2;"), "2\n");
        assert_eq!(run_ok("print 10 / 4;"), "2.5\n");
        assert_eq!(run_ok("print 2.5;"), "2.5\n");
        assert_eq!(run_ok("print -5;"), "-5\n");
    }

    #[test]
    fn modulo_operator() {
        assert_eq!(run_ok("print 7 % 3;"), "1\n");
        assert_eq!(run_ok("print 10 % 2;"), "0\n");
        assert_eq!(run_ok("print 9 % 3.5;"), "2\n");
    }

    #[test]
    fn string_concatenation() {
        assert_eq!(run_ok("print \"a\" + \"b\";"), "ab\n");
    }

    #[test]
    fn string_concat_coerces_numbers() {
        assert_eq!(run_ok("print \"x=\" + 3;"), "x=3\n");
        assert_eq!(run_ok("print 3 + \"=x\";"), "3=x\n");
        assert_eq!(run_ok("print \"v: \" + nil;"), "v: nil\n");
        assert_eq!(run_ok("print \"b: \" + true;"), "b: true\n");
    }

    // ── Truthiness and equality ──────────────────────────────────────────────

    #[test]
    fn truthiness_law() {
        assert_eq!(run_ok("print !!0;"), "true\n");
        assert_eq!(run_ok("print !!\"\";"), "true\n");
        assert_eq!(run_ok("print !!nil;"), "false\n");
        assert_eq!(run_ok("print !!false;"), "false\n");
        assert_eq!(run_ok("print !!true;"), "true\n");
    }

    #[test]
    fn equality_within_types() {
        assert_eq!(run_ok("print 1 == 1;"), "true\n");
        assert_eq!(run_ok("print \"a\" == \"a\";"), "true\n");
        assert_eq!(run_ok("print nil == nil;"), "true\n");
        assert_eq!(run_ok("print true == true;"), "true\n");
    }

    #[test]
    fn equality_across_types_is_false_not_an_error() {
        assert_eq!(run_ok("print 1 == \"1\";"), "false\n");
        assert_eq!(run_ok("print nil == false;"), "false\n");
        assert_eq!(run_ok("print 0 == false;"), "false\n");
    }

    #[test]
    fn bang_equal_negates_equality() {
        assert_eq!(run_ok("print 1 != 2;"), "true\n");
        assert_eq!(run_ok("print 1 != 1;"), "false\n");
    }

    // ── Logical operators ────────────────────────────────────────────────────

    #[test]
    fn logical_operators_return_raw_operands() {
        assert_eq!(run_ok("print \"hi\" or 2;"), "hi\n");
        assert_eq!(run_ok("print nil or \"yes\";"), "yes\n");
        assert_eq!(run_ok("print nil and \"no\";"), "nil\n");
        assert_eq!(run_ok("print 1 and 2;"), "2\n");
    }

    #[test]
    fn logical_operators_short_circuit() {
        let code = "
            var touched = false;
            fun touch() { touched = true; return true; }
            true or touch();
            print touched;
            false and touch();
            print touched;
        ";

        assert_eq!(run_ok(code), "false\nfalse\n");
    }

    // ── Variables and scoping ────────────────────────────────────────────────

    #[test]
    fn variable_scoping() {
        let code = "
            var a = \"global a\";
            var b = \"global b\";
            {
                var a = \"outer a\";
                {
                    var a = \"inner a\";
                    print a;
                    print b;
                }
                print a;
            }
            print a;
        ";

        assert_eq!(
            run_ok(code),
            "inner a\nglobal b\nouter a\nglobal a\n"
        );
    }

    #[test]
    fn reassignment() {
        assert_eq!(
            run_ok("var a = \"original\"; a = \"updated\"; print a;"),
            "updated\n"
        );
    }

    #[test]
    fn assignment_expression_yields_assigned_value() {
        assert_eq!(run_ok("var a = 1; print a = 2;"), "2\n");
    }

    #[test]
    fn uninitialized_variable_is_nil() {
        assert_eq!(run_ok("var a; print a;"), "nil\n");
    }

    // ── Control flow ─────────────────────────────────────────────────────────

    #[test]
    fn if_else_branches_on_truthiness() {
        assert_eq!(run_ok("if (1) print \"t\"; else print \"f\";"), "t\n");
        assert_eq!(run_ok("if (nil) print \"t\"; else print \"f\";"), "f\n");
    }

    #[test]
    fn while_loop_reevaluates_condition() {
        assert_eq!(run_ok("var i = 0; while (i < 3) i = i + 1; print i;"), "3\n");
    }

    #[test]
    fn for_loop_variants() {
        let code = "
            for (var a = 0; a < 3; a = a + 1) { print a; }
            for (var a = 12; a >= 10; ) { print a; a = a - 1; }
            var a = 20;
            for (; a < 22;) { print a; a = a + 1; }
        ";

        assert_eq!(run_ok(code), "0\n1\n2\n12\n11\n10\n20\n21\n");
    }

    #[test]
    fn break_exits_loop() {
        let code = "var i = 0; while (true) { if (i == 3) break; i = i + 1; } print i;";

        assert_eq!(run_ok(code), "3\n");
    }

    #[test]
    fn break_exits_only_innermost_loop() {
        let code = "
            var total = 0;
            for (var i = 0; i < 3; i = i + 1) {
                for (var j = 0; j < 3; j = j + 1) {
                    if (j == 1) break;
                    total = total + 1;
                }
            }
            print total;
        ";

        assert_eq!(run_ok(code), "3\n");
    }

    // ── Functions ────────────────────────────────────────────────────────────

    #[test]
    fn function_declaration_and_call() {
        let code = "
            fun say(n) {
                if (n > 2) print \"big one\";
                print n;
            }
            say(3);
        ";

        assert_eq!(run_ok(code), "big one\n3\n");
    }

    #[test]
    fn function_return_skips_rest_of_body() {
        let code = "
            fun getNumber() {
                return 82;
                print \"unreachable\";
            }
            print getNumber();
        ";

        assert_eq!(run_ok(code), "82\n");
    }

    #[test]
    fn function_without_return_yields_nil() {
        assert_eq!(run_ok("fun noop() {} print noop();"), "nil\n");
    }

    #[test]
    fn recursion() {
        let code = "
            fun fib(n) {
                if (n <= 1) return n;
                return fib(n - 2) + fib(n - 1);
            }
            for (var i = 0; i < 10; i = i + 1) {
                print fib(i);
            }
        ";

        assert_eq!(run_ok(code), "0\n1\n1\n2\n3\n5\n8\n13\n21\n34\n");
    }

    #[test]
    fn first_class_functions() {
        let code = "
            fun say(n) { print n; }
            var sayAlias = say;
            sayAlias(\"test string\");
        ";

        assert_eq!(run_ok(code), "test string\n");
    }

    #[test]
    fn closures_capture_by_reference() {
        let code = "
            fun makeCounter() {
                var n = 0;
                fun c() { n = n + 1; return n; }
                return c;
            }
            var c = makeCounter();
            print c();
            print c();
            print c();
        ";

        assert_eq!(run_ok(code), "1\n2\n3\n");
    }

    #[test]
    fn closure_outlives_its_block() {
        let code = "
            var funcRef;
            {
                var divisor = 2;
                fun printHalf(n) { print n / divisor; }
                funcRef = printHalf;
            }
            var divisor = 300;
            funcRef(8);
        ";

        assert_eq!(run_ok(code), "4\n");
    }

    #[test]
    fn resolver_fixes_late_binding() {
        let code = "
            var a = \"global\";
            {
                fun show() { print a; }
                show();
                var a = \"local\";
                show();
            }
        ";

        assert_eq!(run_ok(code), "global\nglobal\n");
    }

    #[test]
    fn function_display_forms() {
        assert_eq!(run_ok("fun f() {} print f;"), "<fn f>\n");
        assert_eq!(run_ok("print clock;"), "<native fn>\n");
    }

    #[test]
    fn clock_returns_a_positive_number() {
        assert_eq!(run_ok("print clock() > 0;"), "true\n");
    }

    // ── Classes ──────────────────────────────────────────────────────────────

    #[test]
    fn class_instance_prints_its_class_name() {
        assert_eq!(run_ok("class P { } var p = P(); print p;"), "P instance\n");
    }

    #[test]
    fn class_value_prints_its_name() {
        assert_eq!(run_ok("class A { } print A;"), "A\n");
    }

    #[test]
    fn fields_are_set_and_read() {
        let code = "
            class Bag { }
            var bag = Bag();
            bag.item = \"toast\";
            print bag.item;
        ";

        assert_eq!(run_ok(code), "toast\n");
    }

    #[test]
    fn methods_see_this() {
        let code = "
            class Cake {
                taste() {
                    print \"The \" + this.flavor + \" cake is delicious!\";
                }
            }
            var cake = Cake();
            cake.flavor = \"chocolate\";
            cake.taste();
        ";

        assert_eq!(run_ok(code), "The chocolate cake is delicious!\n");
    }

    #[test]
    fn bound_method_keeps_its_receiver() {
        let code = "
            class Cake { taste() { print this.flavor; } }
            var cake = Cake();
            cake.flavor = \"lemon\";
            var taste = cake.taste;
            taste();
        ";

        assert_eq!(run_ok(code), "lemon\n");
    }

    #[test]
    fn initializer_receives_arguments() {
        let code = "
            class Point {
                init(x, y) {
                    this.x = x;
                    this.y = y;
                }
            }
            var p = Point(1, 2);
            print p.x + p.y;
        ";

        assert_eq!(run_ok(code), "3\n");
    }

    #[test]
    fn initializer_returns_the_instance() {
        let code = "
            class F { init() { } }
            var f = F();
            print f.init();
        ";

        assert_eq!(run_ok(code), "F instance\n");
    }

    #[test]
    fn bare_return_in_initializer_exits_early() {
        let code = "
            class G {
                init() {
                    this.x = 1;
                    return;
                }
            }
            print G().x;
        ";

        assert_eq!(run_ok(code), "1\n");
    }

    #[test]
    fn field_shadows_method() {
        let code = "
            class C { m() { return \"method\"; } }
            var c = C();
            print c.m();
            c.m = \"field\";
            print c.m;
        ";

        assert_eq!(run_ok(code), "method\nfield\n");
    }

    #[test]
    fn methods_can_construct_their_own_class() {
        let code = "
            class Node {
                make() { return Node(); }
            }
            print Node().make();
        ";

        assert_eq!(run_ok(code), "Node instance\n");
    }

    // ── Runtime errors ───────────────────────────────────────────────────────

    #[test]
    fn divide_by_zero_is_a_runtime_error() {
        expect_runtime_error("print 1 / 0;");
        expect_runtime_error("print 1 % 0;");
    }

    #[test]
    fn unary_minus_requires_a_number() {
        expect_runtime_error("print -\"x\";");
    }

    #[test]
    fn comparison_requires_numbers() {
        expect_runtime_error("print 1 < \"2\";");
    }

    #[test]
    fn plus_without_string_or_numbers_is_an_error() {
        expect_runtime_error("print 1 + nil;");
        expect_runtime_error("print true + false;");
    }

    #[test]
    fn undefined_variable_is_a_runtime_error() {
        expect_runtime_error("print q;");
    }

    #[test]
    fn calling_a_non_callable_is_a_runtime_error() {
        expect_runtime_error("var x = 1; x();");
        expect_runtime_error("\"str\"();");
    }

    #[test]
    fn arity_mismatch_is_a_runtime_error() {
        expect_runtime_error("fun f(a, b) {} f(1);");
        expect_runtime_error("fun f() {} f(1);");
        expect_runtime_error("clock(1);");
    }

    #[test]
    fn property_access_requires_an_instance() {
        expect_runtime_error("var s = \"x\"; print s.len;");
        expect_runtime_error("var n = 1; n.f = 2;");
    }

    #[test]
    fn undefined_property_is_a_runtime_error() {
        expect_runtime_error("class P { } var p = P(); print p.q;");
    }

    #[test]
    fn runtime_error_abandons_remaining_statements() {
        let (output, _, had_runtime_error) = run_program("print 1; print 1 / 0; print 2;");

        assert!(had_runtime_error);
        assert_eq!(output, "1\n");
    }

    // ── Compile-time rejections ──────────────────────────────────────────────

    #[test]
    fn reading_a_local_in_its_own_initializer_is_rejected() {
        expect_compile_error("{ var a = a; }");
    }

    #[test]
    fn top_level_self_reference_is_a_runtime_matter() {
        // Globals are not tracked by the resolver, so this fails at runtime
        // (undefined variable), not at compile time.
        expect_runtime_error("var a = a;");
    }

    #[test]
    fn duplicate_declaration_in_same_scope_is_rejected() {
        expect_compile_error("{ var a = 1; var a = 2; }");
        expect_compile_error("fun f(a, a) {}");
    }

    #[test]
    fn top_level_return_is_rejected() {
        expect_compile_error("return 1;");
    }

    #[test]
    fn returning_a_value_from_an_initializer_is_rejected() {
        expect_compile_error("class C { init() { return 1; } }");
    }

    #[test]
    fn this_outside_a_class_is_rejected() {
        expect_compile_error("print this;");
        expect_compile_error("fun f() { return this; }");
    }

    #[test]
    fn compile_error_skips_evaluation_entirely() {
        let (output, had_error, _) = run_program("print 1; var = 2;");

        assert!(had_error);
        assert_eq!(output, "");
    }

    // ── Session behavior (REPL-style reuse of one interpreter) ───────────────

    #[test]
    fn session_state_survives_a_runtime_error() {
        let mut buffer: Vec<u8> = Vec::new();

        {
            let mut interpreter: Interpreter = Interpreter::new(&mut buffer);
            let mut reporter: Reporter = Reporter::new();

            lox::run("var a = 1; print missing;", &mut interpreter, &mut reporter);
            assert!(reporter.had_runtime_error());

            reporter.reset_error();

            lox::run("print a;", &mut interpreter, &mut reporter);
        }

        assert_eq!(String::from_utf8(buffer).unwrap(), "1\n");
    }

    #[test]
    fn closures_keep_working_across_session_lines() {
        let mut buffer: Vec<u8> = Vec::new();

        {
            let mut interpreter: Interpreter = Interpreter::new(&mut buffer);
            let mut reporter: Reporter = Reporter::new();

            lox::run(
                "fun make() { var n = 0; fun c() { n = n + 1; return n; } return c; }",
                &mut interpreter,
                &mut reporter,
            );
            lox::run("var c = make();", &mut interpreter, &mut reporter);
            lox::run("print c(); print c();", &mut interpreter, &mut reporter);

            assert!(!reporter.had_error());
            assert!(!reporter.had_runtime_error());
        }

        assert_eq!(String::from_utf8(buffer).unwrap(), "1\n2\n");
    }

    #[test]
    fn compile_error_on_one_line_leaves_globals_intact() {
        let mut buffer: Vec<u8> = Vec::new();

        {
            let mut interpreter: Interpreter = Interpreter::new(&mut buffer);
            let mut reporter: Reporter = Reporter::new();

            lox::run("var a = 41;", &mut interpreter, &mut reporter);

            lox::run("var = ;", &mut interpreter, &mut reporter);
            assert!(reporter.had_error());
            reporter.reset_error();

            lox::run("print a + 1;", &mut interpreter, &mut reporter);
            assert!(!reporter.had_error());
        }

        assert_eq!(String::from_utf8(buffer).unwrap(), "42\n");
    }
}
